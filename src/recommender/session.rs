//! RecommenderSession: one guided Q&A pass for a project and security control.
//!
//! Owns the questionnaire walker, the chat transcript shown to the user, and
//! the ranked recommendations. The recommendation request is issued from the
//! walker's completion transition, so each pass through the dialog produces
//! exactly one request. A new pass requires [`RecommenderSession::reset`].

use std::sync::Arc;

use uuid::Uuid;

use crate::api::{DialogSubject, RecSecBackend};
use crate::error::{self, ApiError, Error, WalkerError};
use crate::model::{Message, Preferences, RecommendationRequest, SecurityPatternRecommendation};

use super::dialog::Question;
use super::walker::{QuestionnaireWalker, Transition};

/// What the session is waiting for after an answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionStep<'a> {
    /// The next question to put to the user.
    Question(&'a Question),
    /// The dialog finished and these recommendations came back.
    Recommendations(&'a [SecurityPatternRecommendation]),
}

pub struct RecommenderSession {
    id: Uuid,
    backend: Arc<dyn RecSecBackend>,
    project_id: i64,
    security_control_id: i64,
    walker: QuestionnaireWalker,
    transcript: Vec<Message>,
    recommendations: Option<Vec<SecurityPatternRecommendation>>,
}

impl RecommenderSession {
    /// Fetch the dialog for `security_control_id` and put the first question.
    pub async fn load(
        backend: Arc<dyn RecSecBackend>,
        project_id: i64,
        security_control_id: i64,
    ) -> Result<Self, ApiError> {
        let graph = backend
            .preference_elicitation_dialog(DialogSubject::SecurityControl(security_control_id))
            .await?;

        let id = Uuid::new_v4();
        tracing::info!(
            session = %id,
            project_id,
            security_control_id,
            questions = graph.len(),
            "Recommender session started"
        );

        let mut session = Self {
            id,
            backend,
            project_id,
            security_control_id,
            walker: QuestionnaireWalker::new(graph),
            transcript: Vec::new(),
            recommendations: None,
        };
        session.post_current_question();
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    pub fn security_control_id(&self) -> i64 {
        self.security_control_id
    }

    pub fn walker(&self) -> &QuestionnaireWalker {
        &self.walker
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.walker.current_question()
    }

    pub fn is_finished(&self) -> bool {
        self.walker.is_finished()
    }

    pub fn answers(&self) -> &Preferences {
        self.walker.answers()
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Recommendations of the finished pass, if the request succeeded.
    pub fn recommendations(&self) -> Option<&[SecurityPatternRecommendation]> {
        self.recommendations.as_deref()
    }

    /// Answer the pending question.
    ///
    /// When the answer ends the dialog, the collected preferences are sent
    /// for recommendation. A failed request is returned and not retried; the
    /// session stays finished without recommendations until reset.
    pub async fn select_answer(&mut self, answer_key: &str) -> error::Result<SessionStep<'_>> {
        let display_text = self
            .walker
            .current_question()
            .and_then(|q| q.answer(answer_key))
            .map(|a| a.display_text.clone());

        let transition = self.walker.select_answer_key(answer_key)?;
        if let Some(text) = display_text {
            self.transcript.push(Message::user(text));
        }

        match transition {
            Transition::Asked(_) => {
                self.post_current_question();
                // A validated graph has a question behind every non-terminal key.
                self.walker
                    .current_question()
                    .map(SessionStep::Question)
                    .ok_or(Error::Walker(WalkerError::Finished))
            }
            Transition::Completed(preferences) => {
                let request = RecommendationRequest {
                    security_control_id: self.security_control_id,
                    project_id: self.project_id,
                    user_preferences: preferences,
                };
                tracing::info!(
                    session = %self.id,
                    answers = request.user_preferences.len(),
                    "Dialog finished, requesting recommendations"
                );
                let recommendations = self.backend.recommend_security_patterns(&request).await?;
                tracing::info!(
                    session = %self.id,
                    count = recommendations.len(),
                    "Recommendations received"
                );
                let stored = self.recommendations.insert(recommendations);
                Ok(SessionStep::Recommendations(stored.as_slice()))
            }
        }
    }

    /// Free-text question to the assistant. The reply is appended to the
    /// transcript, followed by the pending question again so the dialog can
    /// continue. A failed request leaves the transcript as it was.
    pub async fn ask(&mut self, text: &str) -> Result<String, ApiError> {
        self.transcript.push(Message::user(text));
        let reply = match self
            .backend
            .chat_completion(self.project_id, &self.transcript)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                self.transcript.pop();
                return Err(e);
            }
        };
        self.transcript.push(Message::assistant(reply.clone()));
        self.post_current_question();
        Ok(reply)
    }

    /// Start over: forget answers, recommendations and transcript.
    pub fn reset(&mut self) {
        tracing::debug!(session = %self.id, "Recommender session reset");
        self.walker.reset();
        self.transcript.clear();
        self.recommendations = None;
        self.post_current_question();
    }

    fn post_current_question(&mut self) {
        if let Some(question) = self.walker.current_question() {
            self.transcript.push(Message::question(
                question.display_text.clone(),
                question.answers.clone(),
            ));
        }
    }
}
