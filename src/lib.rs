//! RecSec client: typed access to the security-pattern recommender.
//!
//! - [`api`]: REST client and the [`api::RecSecBackend`] seam.
//! - [`recommender`]: dialog graph, questionnaire walker, recommender session.
//! - [`form`]: multi-step form sequencer and the project creation form.
//! - [`projects`]: project list and selection helpers.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod projects;
pub mod recommender;
