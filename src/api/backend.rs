//! `RecSecBackend`: the async interface the state machines talk through.
//!
//! [`ApiClient`] is the production implementation; tests substitute
//! in-memory backends.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{
    Explanation, Message, Project, ProjectCreationData, ProjectOverview, RecommendationRequest,
    SecurityPattern, SecurityPatternRecommendation,
};
use crate::recommender::dialog::DialogGraph;

use super::{ApiClient, DialogSubject};

#[async_trait]
pub trait RecSecBackend: Send + Sync {
    // ── Projects ────────────────────────────────────────────────────

    async fn list_projects(&self) -> Result<Vec<ProjectOverview>, ApiError>;

    async fn get_project(&self, project_id: i64) -> Result<Project, ApiError>;

    async fn create_project(&self, data: &ProjectCreationData) -> Result<(), ApiError>;

    // ── Recommendations ─────────────────────────────────────────────

    /// Fetch and validate the dialog graph for a control or pattern.
    async fn preference_elicitation_dialog(
        &self,
        subject: DialogSubject,
    ) -> Result<DialogGraph, ApiError>;

    async fn recommend_security_patterns(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<SecurityPatternRecommendation>, ApiError>;

    // ── AI ──────────────────────────────────────────────────────────

    async fn chat_completion(
        &self,
        project_id: i64,
        messages: &[Message],
    ) -> Result<String, ApiError>;

    async fn natural_language_explanation(
        &self,
        pattern: &SecurityPattern,
        explanations: &[Explanation],
    ) -> Result<String, ApiError>;
}

#[async_trait]
impl RecSecBackend for ApiClient {
    async fn list_projects(&self) -> Result<Vec<ProjectOverview>, ApiError> {
        ApiClient::list_projects(self).await
    }

    async fn get_project(&self, project_id: i64) -> Result<Project, ApiError> {
        ApiClient::get_project(self, project_id).await
    }

    async fn create_project(&self, data: &ProjectCreationData) -> Result<(), ApiError> {
        ApiClient::create_project(self, data).await
    }

    async fn preference_elicitation_dialog(
        &self,
        subject: DialogSubject,
    ) -> Result<DialogGraph, ApiError> {
        ApiClient::preference_elicitation_dialog(self, subject).await
    }

    async fn recommend_security_patterns(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<SecurityPatternRecommendation>, ApiError> {
        ApiClient::recommend_security_patterns(self, request).await
    }

    async fn chat_completion(
        &self,
        project_id: i64,
        messages: &[Message],
    ) -> Result<String, ApiError> {
        ApiClient::chat_completion(self, project_id, messages).await
    }

    async fn natural_language_explanation(
        &self,
        pattern: &SecurityPattern,
        explanations: &[Explanation],
    ) -> Result<String, ApiError> {
        ApiClient::natural_language_explanation(self, pattern, explanations).await
    }
}
