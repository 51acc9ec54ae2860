//! Questionnaire walker: follows a dialog graph one answer at a time.
//!
//! Progresses from the entry point along the selected answers until an
//! answer leads to [`END`]. Reaching the end is a transition in its own
//! right: [`QuestionnaireWalker::select_answer`] returns
//! [`Transition::Completed`] exactly once per pass, and the walker then
//! refuses further answers until it is reset.

use serde::{Deserialize, Serialize};

use crate::error::WalkerError;
use crate::model::Preferences;

use super::dialog::{Answer, DialogGraph, END, Question};

/// Where the walker currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "question", rename_all = "snake_case")]
pub enum WalkerPosition {
    /// Waiting for an answer to the question with this key.
    Asking(String),
    /// An answer led to the end marker.
    Finished,
}

impl WalkerPosition {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl std::fmt::Display for WalkerPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asking(key) => write!(f, "{key}"),
            Self::Finished => write!(f, "{END}"),
        }
    }
}

/// Result of a successful answer selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Moved on to the question with this key.
    Asked(String),
    /// The dialog finished; carries the complete set of answers.
    Completed(Preferences),
}

/// Walks a [`DialogGraph`], accumulating one answer per question.
#[derive(Debug, Clone)]
pub struct QuestionnaireWalker {
    graph: DialogGraph,
    position: WalkerPosition,
    answers: Preferences,
}

impl QuestionnaireWalker {
    /// Start a walk at the graph's entry point.
    pub fn new(graph: DialogGraph) -> Self {
        let position = WalkerPosition::Asking(graph.entry_point().to_string());
        Self {
            graph,
            position,
            answers: Preferences::new(),
        }
    }

    pub fn graph(&self) -> &DialogGraph {
        &self.graph
    }

    pub fn position(&self) -> &WalkerPosition {
        &self.position
    }

    /// Key of the pending question, or [`END`] once finished.
    pub fn current_key(&self) -> &str {
        match &self.position {
            WalkerPosition::Asking(key) => key,
            WalkerPosition::Finished => END,
        }
    }

    /// The pending question, `None` once finished.
    pub fn current_question(&self) -> Option<&Question> {
        match &self.position {
            WalkerPosition::Asking(key) => self.graph.question(key),
            WalkerPosition::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position.is_terminal()
    }

    /// Answers recorded so far.
    pub fn answers(&self) -> &Preferences {
        &self.answers
    }

    /// Record `answer` for the pending question and follow it.
    ///
    /// The answer must be one the pending question offers; the graph's own
    /// copy decides where the walk continues.
    pub fn select_answer(&mut self, answer: &Answer) -> Result<Transition, WalkerError> {
        self.select_answer_key(&answer.answer_key)
    }

    /// Like [`select_answer`](Self::select_answer), addressed by answer key.
    pub fn select_answer_key(&mut self, answer_key: &str) -> Result<Transition, WalkerError> {
        let WalkerPosition::Asking(current) = &self.position else {
            return Err(WalkerError::Finished);
        };
        let current = current.clone();

        let next = self
            .graph
            .question(&current)
            .and_then(|q| q.answer(answer_key))
            .map(|a| a.next_question.clone())
            .ok_or_else(|| WalkerError::UnknownAnswer {
                question: current.clone(),
                answer: answer_key.to_string(),
            })?;

        self.answers.insert(current.clone(), answer_key.to_string());
        tracing::debug!(question = %current, answer = %answer_key, next = %next, "Answer recorded");

        if next == END {
            self.position = WalkerPosition::Finished;
            Ok(Transition::Completed(self.answers.clone()))
        } else {
            self.position = WalkerPosition::Asking(next.clone());
            Ok(Transition::Asked(next))
        }
    }

    /// Return to the entry point and forget all answers.
    pub fn reset(&mut self) {
        self.position = WalkerPosition::Asking(self.graph.entry_point().to_string());
        self.answers.clear();
    }
}
