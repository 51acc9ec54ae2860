//! Recommendation request and ranked result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::security_pattern::SecurityPattern;

/// Collected answers: question key → selected answer key.
pub type Preferences = BTreeMap<String, String>;

/// Body of `POST /recommendations/security-patterns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub security_control_id: i64,
    pub project_id: i64,
    pub user_preferences: Preferences,
}

/// Outcome of evaluating one constraint against a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub constraint_name: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub constraint_description: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub is_hard: bool,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub applicable: bool,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub satisfied: bool,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub rationale: String,
}

/// A ranked recommendation with the reasoning behind its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPatternRecommendation {
    pub security_pattern: SecurityPattern,
    pub score: f64,
    #[serde(default)]
    pub explanations: Vec<Explanation>,
}

impl SecurityPatternRecommendation {
    /// Explanations of applicable constraints the pattern satisfies.
    pub fn satisfied(&self) -> impl Iterator<Item = &Explanation> {
        self.explanations
            .iter()
            .filter(|e| e.applicable && e.satisfied)
    }

    /// Explanations of applicable constraints the pattern violates.
    pub fn violated(&self) -> impl Iterator<Item = &Explanation> {
        self.explanations
            .iter()
            .filter(|e| e.applicable && !e.satisfied)
    }
}

/// Body of `POST /ai/natural-language-explanation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalLanguageExplanationRequest<'a> {
    pub security_pattern: &'a SecurityPattern,
    pub explanations: &'a [Explanation],
}
