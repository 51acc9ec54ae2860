//! Wire types shared with the RecSec backend.

pub mod chat;
pub mod project;
pub mod properties;
pub mod recommendation;
pub mod security_pattern;

pub use chat::{Message, MessageType, enrich_messages};
pub use project::{
    Project, ProjectCreationData, ProjectOverview, ProjectProperties, SECURITY_CONTROLS,
    SecurityControl, SecurityRequirement, SecurityRequirementCreationRequest,
};
pub use properties::{
    ApplicationType, ComplianceRequirement, DataType, PropertyKey, PropertyOption,
    SecurityStrengthNeed, SelectionKind, UserBaseSize, UserType,
};
pub use recommendation::{
    Explanation, NaturalLanguageExplanationRequest, Preferences, RecommendationRequest,
    SecurityPatternRecommendation,
};
pub use security_pattern::{SecurityPattern, SecurityPatternDescription};

use serde::{Deserialize, Deserializer};

/// Reads an explicit JSON `null` as the field's default value. Pair with
/// `#[serde(default)]` so a missing key behaves the same.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
