//! Error types for the RecSec client.

use std::time::Duration;

/// Errors of operations that combine backend calls with local state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Questionnaire error: {0}")]
    Walker(#[from] WalkerError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures talking to the RecSec backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Request {operation} failed: {reason}")]
    Transport { operation: String, reason: String },

    #[error("Request {operation} timed out after {timeout:?}")]
    Timeout { operation: String, timeout: Duration },

    #[error("Request {operation} returned {status}: {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response for {operation}: {reason}")]
    InvalidResponse { operation: String, reason: String },

    #[error("Malformed dialog in response: {0}")]
    Dialog(#[from] DialogError),
}

/// A preference elicitation dialog payload that cannot be walked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    #[error("Dialog payload is not a JSON object")]
    NotAnObject,

    #[error("Dialog has no entry point")]
    MissingEntryPoint,

    #[error("Entry point {0} is not a question in the dialog")]
    UnknownEntryPoint(String),

    #[error("Question key {0} is reserved for the terminal marker")]
    ReservedKey(String),

    #[error("Question {key} is malformed: {reason}")]
    MalformedQuestion { key: String, reason: String },

    #[error("Question {0} offers no answers")]
    NoAnswers(String),

    #[error("Question {question} offers answer {answer} more than once")]
    DuplicateAnswer { question: String, answer: String },

    #[error("Answer {answer} of question {question} leads to unknown question {target}")]
    DanglingAnswer {
        question: String,
        answer: String,
        target: String,
    },

    #[error("Question {0} can never reach the end of the dialog")]
    NoPathToEnd(String),
}

/// Invalid moves through a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalkerError {
    #[error("Questionnaire is already finished")]
    Finished,

    #[error("Answer {answer} is not offered by question {question}")]
    UnknownAnswer { question: String, answer: String },
}

/// Multi-step form errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("A multi-step form needs at least one step")]
    NoSteps,

    #[error("Step {index} is out of range (form has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },

    #[error("{property} has no option {key}")]
    UnknownOption { property: String, key: String },
}

/// Identifiers that do not resolve against locally cached data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Project {0} not found")]
    ProjectNotFound(i64),

    #[error("A project needs to be selected first")]
    NoProjectSelected,

    #[error("Security requirement {0} not found")]
    SecurityRequirementNotFound(i64),

    #[error("There is no security control with id {0}")]
    UnknownSecurityControl(i64),
}

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, Error>;
