//! `/recommendations` endpoints.

use reqwest::Method;

use crate::error::ApiError;
use crate::model::{RecommendationRequest, SecurityPatternRecommendation};
use crate::recommender::dialog::DialogGraph;

use super::ApiClient;

/// What a preference elicitation dialog is requested for. The backend
/// accepts exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSubject {
    SecurityControl(i64),
    SecurityPattern(i64),
}

impl DialogSubject {
    fn query(&self) -> (&'static str, String) {
        match self {
            Self::SecurityControl(id) => ("securityControlId", id.to_string()),
            Self::SecurityPattern(id) => ("securityPatternId", id.to_string()),
        }
    }
}

impl std::fmt::Display for DialogSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SecurityControl(id) => write!(f, "security control {id}"),
            Self::SecurityPattern(id) => write!(f, "security pattern {id}"),
        }
    }
}

impl ApiClient {
    /// `GET /recommendations/preference-elicitation-dialogs`, validated into a
    /// walkable graph.
    pub async fn preference_elicitation_dialog(
        &self,
        subject: DialogSubject,
    ) -> Result<DialogGraph, ApiError> {
        let operation = format!("GET preference-elicitation-dialog ({subject})");
        let builder = self
            .request(Method::GET, "/recommendations/preference-elicitation-dialogs")
            .query(&[subject.query()]);
        let payload: serde_json::Value = self.send_json(&operation, builder).await?;

        DialogGraph::from_payload(&payload).map_err(|e| {
            tracing::error!(operation = %operation, error = %e, "Rejected malformed dialog");
            ApiError::Dialog(e)
        })
    }

    /// `POST /recommendations/security-patterns`: ranked recommendations for
    /// the collected preferences.
    pub async fn recommend_security_patterns(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<SecurityPatternRecommendation>, ApiError> {
        let operation = format!(
            "POST security-pattern recommendations (project {}, security control {})",
            request.project_id, request.security_control_id
        );
        let builder = self
            .request(Method::POST, "/recommendations/security-patterns")
            .json(request);
        self.send_json(&operation, builder).await
    }
}
