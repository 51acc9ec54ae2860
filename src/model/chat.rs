//! Chat transcript messages exchanged with the recommender assistant.

use serde::{Deserialize, Serialize};

use crate::recommender::dialog::Answer;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    User,
    Assistant,
}

/// A transcript entry. Assistant questions carry their answer choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<Answer>>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            kind: MessageType::User,
            content: content.into(),
            answers: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            kind: MessageType::Assistant,
            content: content.into(),
            answers: None,
        }
    }

    /// An assistant message asking a question with a fixed set of answers.
    pub fn question(content: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            kind: MessageType::Assistant,
            content: content.into(),
            answers: Some(answers),
        }
    }

    /// Fold the answer choices into the text so the chat model sees them.
    pub fn enriched(&self) -> Message {
        match self.answers.as_deref() {
            Some(answers) if !answers.is_empty() => {
                let choices = answers
                    .iter()
                    .map(|a| a.display_text.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Message {
                    kind: self.kind,
                    content: format!(
                        "{} (the user has the following answer possibilities: {})",
                        self.content, choices
                    ),
                    answers: None,
                }
            }
            _ => self.clone(),
        }
    }
}

/// Enrich every message of a transcript.
pub fn enrich_messages(messages: &[Message]) -> Vec<Message> {
    messages.iter().map(Message::enriched).collect()
}
