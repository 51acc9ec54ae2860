//! In-memory backend for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::error::ApiError;
use crate::model::{
    Explanation, Message, Project, ProjectCreationData, ProjectOverview, ProjectProperties,
    RecommendationRequest, SecurityControl, SecurityPattern, SecurityPatternRecommendation,
    SecurityRequirement,
};
use crate::recommender::dialog::DialogGraph;

use super::{DialogSubject, RecSecBackend};

/// Records every call and answers from canned data.
#[derive(Default)]
pub struct StubBackend {
    pub dialog: Option<serde_json::Value>,
    pub recommendations: Vec<SecurityPatternRecommendation>,
    pub projects: Vec<Project>,
    pub chat_reply: String,
    pub fail_recommendations: bool,
    pub fail_create: bool,
    pub fail_explanations: bool,
    pub fail_chat: bool,

    pub dialog_calls: AtomicUsize,
    pub explanation_calls: AtomicUsize,
    pub recommendation_requests: Mutex<Vec<RecommendationRequest>>,
    pub chat_requests: Mutex<Vec<Vec<Message>>>,
    pub created: Mutex<Vec<ProjectCreationData>>,
}

impl StubBackend {
    pub fn recommendation_count(&self) -> usize {
        self.recommendation_requests.lock().unwrap().len()
    }
}

fn unavailable(operation: &str) -> ApiError {
    ApiError::Status {
        operation: operation.to_string(),
        status: 503,
        body: "unavailable".to_string(),
    }
}

#[async_trait]
impl RecSecBackend for StubBackend {
    async fn list_projects(&self) -> Result<Vec<ProjectOverview>, ApiError> {
        Ok(self.projects.iter().map(Project::overview).collect())
    }

    async fn get_project(&self, project_id: i64) -> Result<Project, ApiError> {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                operation: format!("GET project {project_id}"),
                status: 404,
                body: String::new(),
            })
    }

    async fn create_project(&self, data: &ProjectCreationData) -> Result<(), ApiError> {
        if self.fail_create {
            return Err(unavailable("POST project"));
        }
        self.created.lock().unwrap().push(data.clone());
        Ok(())
    }

    async fn preference_elicitation_dialog(
        &self,
        _subject: DialogSubject,
    ) -> Result<DialogGraph, ApiError> {
        self.dialog_calls.fetch_add(1, Ordering::SeqCst);
        let payload = self
            .dialog
            .as_ref()
            .ok_or_else(|| unavailable("GET preference-elicitation-dialog"))?;
        Ok(DialogGraph::from_payload(payload)?)
    }

    async fn recommend_security_patterns(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<SecurityPatternRecommendation>, ApiError> {
        self.recommendation_requests
            .lock()
            .unwrap()
            .push(request.clone());
        if self.fail_recommendations {
            return Err(unavailable("POST security-pattern recommendations"));
        }
        Ok(self.recommendations.clone())
    }

    async fn chat_completion(
        &self,
        _project_id: i64,
        messages: &[Message],
    ) -> Result<String, ApiError> {
        self.chat_requests.lock().unwrap().push(messages.to_vec());
        if self.fail_chat {
            return Err(unavailable("POST chat completion"));
        }
        Ok(self.chat_reply.clone())
    }

    async fn natural_language_explanation(
        &self,
        pattern: &SecurityPattern,
        explanations: &[Explanation],
    ) -> Result<String, ApiError> {
        self.explanation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_explanations {
            return Err(unavailable("POST natural-language explanation"));
        }
        Ok(format!(
            "{} fits because of {} constraints",
            pattern.name,
            explanations.len()
        ))
    }
}

pub fn two_step_dialog() -> serde_json::Value {
    serde_json::json!({
        "preferenceElicitationDialog": {
            "entryPoint": "A",
            "A": {
                "displayText": "Question A",
                "answers": [{ "answerKey": "y", "displayText": "Yes", "nextQuestion": "B" }]
            },
            "B": {
                "displayText": "Question B",
                "answers": [{ "answerKey": "y", "displayText": "Yes", "nextQuestion": "end" }]
            }
        }
    })
}

pub fn pattern(id: i64, name: &str) -> SecurityPattern {
    SecurityPattern {
        id,
        name: name.to_string(),
        description: Default::default(),
        properties: Default::default(),
        security_control: SecurityControl {
            id: 1,
            control_type: "Authentication".to_string(),
        },
    }
}

pub fn recommendation(id: i64, name: &str, score: f64) -> SecurityPatternRecommendation {
    SecurityPatternRecommendation {
        security_pattern: pattern(id, name),
        score,
        explanations: Vec::new(),
    }
}

pub fn project(id: i64, name: &str, requirements: &[(i64, &str)]) -> Project {
    let stamp = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    Project {
        id,
        name: name.to_string(),
        properties: ProjectProperties::default(),
        created_at: stamp,
        updated_at: stamp,
        security_requirements: requirements
            .iter()
            .map(|(id, title)| SecurityRequirement {
                id: *id,
                title: title.to_string(),
                description: String::new(),
            })
            .collect(),
    }
}
