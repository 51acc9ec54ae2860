//! Recommender: guided preference elicitation ahead of pattern recommendation.
//!
//! The backend supplies a dialog graph per security control. The client
//! walks it one answer at a time, and once an answer leads to the end
//! marker the collected preferences are sent off for a ranked list of
//! security patterns.

pub mod dialog;
pub mod explanations;
pub mod session;
pub mod walker;

pub use dialog::{Answer, DialogGraph, END, Question};
pub use explanations::ExplanationCache;
pub use session::{RecommenderSession, SessionStep};
pub use walker::{QuestionnaireWalker, Transition, WalkerPosition};
