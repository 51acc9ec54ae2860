//! Project, security requirement and security control data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::properties::{
    ApplicationType, ComplianceRequirement, DataType, PropertyKey, SecurityStrengthNeed,
    UserBaseSize, UserType,
};

/// Project as listed on the projects overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A security requirement attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRequirement {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub description: String,
}

/// Project detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub properties: ProjectProperties,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub security_requirements: Vec<SecurityRequirement>,
}

impl Project {
    pub fn overview(&self) -> ProjectOverview {
        ProjectOverview {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Properties describing a project. Every property is optional; unanswered
/// properties travel as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectProperties {
    pub application_type: Option<Vec<ApplicationType>>,
    pub user_base_size: Option<UserBaseSize>,
    pub security_strength_need: Option<SecurityStrengthNeed>,
    pub type_of_data: Option<Vec<DataType>>,
    pub type_of_users: Option<Vec<UserType>>,
    pub compliance_requirements: Option<Vec<ComplianceRequirement>>,
}

impl ProjectProperties {
    /// Human-readable `(property, values)` pairs for the answered properties.
    pub fn describe(&self) -> Vec<(&'static str, Vec<&'static str>)> {
        fn texts<T>(items: &Option<Vec<T>>, text: fn(&T) -> &'static str) -> Option<Vec<&'static str>> {
            items
                .as_ref()
                .filter(|v| !v.is_empty())
                .map(|v| v.iter().map(text).collect())
        }

        let entries = [
            (
                PropertyKey::ApplicationType,
                texts(&self.application_type, ApplicationType::display_text),
            ),
            (
                PropertyKey::UserBaseSize,
                self.user_base_size.map(|v| vec![v.display_text()]),
            ),
            (
                PropertyKey::SecurityStrengthNeed,
                self.security_strength_need.map(|v| vec![v.display_text()]),
            ),
            (
                PropertyKey::TypeOfData,
                texts(&self.type_of_data, DataType::display_text),
            ),
            (
                PropertyKey::TypeOfUsers,
                texts(&self.type_of_users, UserType::display_text),
            ),
            (
                PropertyKey::ComplianceRequirements,
                texts(&self.compliance_requirements, ComplianceRequirement::display_text),
            ),
        ];

        entries
            .into_iter()
            .filter_map(|(key, values)| values.map(|v| (key.display_name(), v)))
            .collect()
    }
}

/// Body of `POST /projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCreationData {
    pub name: String,
    pub properties: ProjectProperties,
}

/// Body of `POST /projects/{id}/security-requirements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRequirementCreationRequest {
    pub title: String,
    pub description: String,
}

/// A category of security concern a project needs patterns for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityControl {
    pub id: i64,
    #[serde(rename = "type")]
    pub control_type: String,
}

/// Security controls the recommender currently supports.
pub const SECURITY_CONTROLS: &[(i64, &str)] = &[(1, "Authentication")];

impl SecurityControl {
    /// Resolve a known security control by id.
    pub fn known(id: i64) -> Option<Self> {
        SECURITY_CONTROLS
            .iter()
            .find(|(known_id, _)| *known_id == id)
            .map(|(id, control_type)| Self {
                id: *id,
                control_type: control_type.to_string(),
            })
    }
}
