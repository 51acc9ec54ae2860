//! Multi-step forms: a generic step sequencer and the project creation form
//! built on it.

pub mod project_form;
pub mod select;
pub mod sequencer;

pub use project_form::{
    FormAction, PROJECT_STEPS, ProjectCreationForm, ProjectField, ProjectFieldUpdate, ProjectStep,
    reduce,
};
pub use select::{choose, toggle};
pub use sequencer::MultiStepForm;
