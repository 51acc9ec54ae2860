//! Preference elicitation dialog graph, validated at ingestion.
//!
//! The backend ships the dialog as a loosely typed JSON map:
//!
//! ```json
//! { "preferenceElicitationDialog": {
//!     "entryPoint": "usability",
//!     "usability": { "displayText": "...", "answers": [
//!         { "answerKey": "high", "displayText": "High", "nextQuestion": "cost" } ] },
//!     ... } }
//! ```
//!
//! [`DialogGraph::from_payload`] turns that into a graph the walker can
//! follow without ever landing on a missing question.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::DialogError;

/// `nextQuestion` value marking the end of the dialog.
pub const END: &str = "end";

/// Key under which the backend wraps the dialog.
const ENVELOPE_KEY: &str = "preferenceElicitationDialog";

const ENTRY_POINT_KEY: &str = "entryPoint";

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub answer_key: String,
    pub display_text: String,
    /// Key of the following question, or [`END`].
    pub next_question: String,
}

impl Answer {
    pub fn is_terminal(&self) -> bool {
        self.next_question == END
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub display_text: String,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn answer(&self, answer_key: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.answer_key == answer_key)
    }
}

/// A validated dialog: every question reachable from the entry point offers
/// at least one answer, every answer leads to a known question or [`END`],
/// and [`END`] is reachable from every reachable question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogGraph {
    entry_point: String,
    questions: BTreeMap<String, Question>,
}

impl DialogGraph {
    /// Build a graph from already-typed questions.
    pub fn new(
        entry_point: impl Into<String>,
        questions: BTreeMap<String, Question>,
    ) -> Result<Self, DialogError> {
        let graph = Self {
            entry_point: entry_point.into(),
            questions,
        };
        graph.validate()?;
        Ok(graph)
    }

    /// Parse the backend payload, with or without the
    /// `preferenceElicitationDialog` envelope.
    pub fn from_payload(payload: &serde_json::Value) -> Result<Self, DialogError> {
        let dialog = match payload.get(ENVELOPE_KEY) {
            Some(inner) => inner,
            None => payload,
        };
        let object = dialog.as_object().ok_or(DialogError::NotAnObject)?;

        let entry_point = object
            .get(ENTRY_POINT_KEY)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(DialogError::MissingEntryPoint)?;

        let mut questions = BTreeMap::new();
        for (key, value) in object {
            if key == ENTRY_POINT_KEY {
                continue;
            }
            if key == END {
                return Err(DialogError::ReservedKey(key.clone()));
            }
            if !value.is_object() {
                tracing::debug!(key = %key, "Skipping non-question dialog entry");
                continue;
            }
            let question: Question = serde_json::from_value(value.clone()).map_err(|e| {
                DialogError::MalformedQuestion {
                    key: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            questions.insert(key.clone(), question);
        }

        Self::new(entry_point, questions)
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn question(&self, key: &str) -> Option<&Question> {
        self.questions.get(key)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    fn validate(&self) -> Result<(), DialogError> {
        if self.questions.contains_key(END) {
            return Err(DialogError::ReservedKey(END.to_string()));
        }
        if !self.questions.contains_key(&self.entry_point) {
            return Err(DialogError::UnknownEntryPoint(self.entry_point.clone()));
        }

        for (key, question) in &self.questions {
            if question.answers.is_empty() {
                return Err(DialogError::NoAnswers(key.clone()));
            }
            let mut seen = HashSet::new();
            for answer in &question.answers {
                if !seen.insert(answer.answer_key.as_str()) {
                    return Err(DialogError::DuplicateAnswer {
                        question: key.clone(),
                        answer: answer.answer_key.clone(),
                    });
                }
                if !answer.is_terminal() && !self.questions.contains_key(&answer.next_question) {
                    return Err(DialogError::DanglingAnswer {
                        question: key.clone(),
                        answer: answer.answer_key.clone(),
                        target: answer.next_question.clone(),
                    });
                }
            }
        }

        let finishing = self.questions_reaching_end();
        for key in self.reachable_from_entry() {
            if !finishing.contains(key) {
                return Err(DialogError::NoPathToEnd(key.to_string()));
            }
        }

        let unreachable = self.questions.len() - self.reachable_from_entry().len();
        if unreachable > 0 {
            tracing::debug!(unreachable, "Dialog contains questions unreachable from the entry point");
        }
        Ok(())
    }

    fn reachable_from_entry(&self) -> BTreeSet<&str> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([self.entry_point.as_str()]);
        while let Some(key) = queue.pop_front() {
            if !seen.insert(key) {
                continue;
            }
            if let Some(question) = self.questions.get(key) {
                queue.extend(
                    question
                        .answers
                        .iter()
                        .filter(|a| !a.is_terminal())
                        .map(|a| a.next_question.as_str()),
                );
            }
        }
        seen
    }

    fn questions_reaching_end(&self) -> HashSet<&str> {
        let mut finishing: HashSet<&str> = HashSet::new();
        loop {
            let before = finishing.len();
            for (key, question) in &self.questions {
                if finishing.contains(key.as_str()) {
                    continue;
                }
                let reaches_end = question
                    .answers
                    .iter()
                    .any(|a| a.is_terminal() || finishing.contains(a.next_question.as_str()));
                if reaches_end {
                    finishing.insert(key.as_str());
                }
            }
            if finishing.len() == before {
                return finishing;
            }
        }
    }
}
