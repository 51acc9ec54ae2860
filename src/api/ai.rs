//! `/ai` endpoints: chat completion and natural-language explanations.

use reqwest::Method;
use serde::Serialize;

use crate::error::ApiError;
use crate::model::{
    Explanation, Message, NaturalLanguageExplanationRequest, SecurityPattern, enrich_messages,
};

use super::ApiClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatCompletionRequest {
    project_id: i64,
    messages: Vec<Message>,
}

impl ApiClient {
    /// `POST /ai/chat-completion`. Question messages are enriched with their
    /// answer choices before sending.
    pub async fn chat_completion(
        &self,
        project_id: i64,
        messages: &[Message],
    ) -> Result<String, ApiError> {
        let operation = format!("POST chat completion for project {project_id}");
        let body = ChatCompletionRequest {
            project_id,
            messages: enrich_messages(messages),
        };
        let builder = self.request(Method::POST, "/ai/chat-completion").json(&body);
        self.send_text(&operation, builder).await
    }

    /// `POST /ai/natural-language-explanation`: prose summary of why a
    /// pattern scored the way it did.
    pub async fn natural_language_explanation(
        &self,
        pattern: &SecurityPattern,
        explanations: &[Explanation],
    ) -> Result<String, ApiError> {
        let operation = format!("POST natural-language explanation for pattern {}", pattern.id);
        let body = NaturalLanguageExplanationRequest {
            security_pattern: pattern,
            explanations,
        };
        let builder = self
            .request(Method::POST, "/ai/natural-language-explanation")
            .json(&body);
        self.send_text(&operation, builder).await
    }
}
