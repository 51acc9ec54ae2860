//! Security pattern catalog types.

use serde::{Deserialize, Serialize};

use super::project::SecurityControl;

/// A consequence of applying a pattern, with the factor it affects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consequence {
    pub factor: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consequences {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub positive: Vec<Consequence>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub negative: Vec<Consequence>,
}

/// A human or non-human actor taking part in a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Participants {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub human: Vec<Participant>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub non_human: Vec<Participant>,
}

/// Structured pattern description. The backend stores it as free-form JSON,
/// so every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityPatternDescription {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub intent: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub problem: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub solution: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub consequences: Consequences,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub participants: Participants,
}

/// A reusable security design solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPattern {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub description: SecurityPatternDescription,
    /// Scored properties; schema varies per security control.
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub security_control: SecurityControl,
}
