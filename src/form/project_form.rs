//! Project creation form: seven steps feeding one `ProjectCreationData`.

use crate::api::RecSecBackend;
use crate::error::{ApiError, FormError};
use crate::model::{
    ApplicationType, ComplianceRequirement, DataType, ProjectCreationData, PropertyKey,
    PropertyOption, SecurityStrengthNeed, SelectionKind, UserBaseSize, UserType,
};

use super::select::{choose, toggle};
use super::sequencer::MultiStepForm;

/// Which field a step edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Name,
    Property(PropertyKey),
}

/// One page of the creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectStep {
    pub field: ProjectField,
    /// Prompt shown above the step.
    pub description: &'static str,
}

impl ProjectStep {
    /// `None` for the free-text name step.
    pub fn selection_kind(&self) -> Option<SelectionKind> {
        match self.field {
            ProjectField::Name => None,
            ProjectField::Property(key) => Some(key.selection_kind()),
        }
    }

    pub fn options(&self) -> Vec<PropertyOption> {
        match self.field {
            ProjectField::Name => Vec::new(),
            ProjectField::Property(key) => key.options(),
        }
    }
}

/// The steps of the creation form, in order.
pub const PROJECT_STEPS: [ProjectStep; 7] = [
    ProjectStep {
        field: ProjectField::Name,
        description: "What is the name of the project?",
    },
    ProjectStep {
        field: ProjectField::Property(PropertyKey::ApplicationType),
        description: "What type of system are you building?",
    },
    ProjectStep {
        field: ProjectField::Property(PropertyKey::UserBaseSize),
        description: "What is the expected user base size?",
    },
    ProjectStep {
        field: ProjectField::Property(PropertyKey::SecurityStrengthNeed),
        description: "How critical is security for this project?",
    },
    ProjectStep {
        field: ProjectField::Property(PropertyKey::TypeOfData),
        description: "What type of data will your system handle?",
    },
    ProjectStep {
        field: ProjectField::Property(PropertyKey::TypeOfUsers),
        description: "What type of users will access the system?",
    },
    ProjectStep {
        field: ProjectField::Property(PropertyKey::ComplianceRequirements),
        description: "Are there specific compliance requirements?",
    },
];

/// A typed field update; each variant replaces exactly one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFieldUpdate {
    Name(String),
    ApplicationType(Option<Vec<ApplicationType>>),
    UserBaseSize(Option<UserBaseSize>),
    SecurityStrengthNeed(Option<SecurityStrengthNeed>),
    TypeOfData(Option<Vec<DataType>>),
    TypeOfUsers(Option<Vec<UserType>>),
    ComplianceRequirements(Option<Vec<ComplianceRequirement>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Update(ProjectFieldUpdate),
    Reset,
}

/// Pure reducer over the form data.
pub fn reduce(state: &ProjectCreationData, action: FormAction) -> ProjectCreationData {
    let mut next = state.clone();
    match action {
        FormAction::Reset => return ProjectCreationData::default(),
        FormAction::Update(update) => {
            let props = &mut next.properties;
            match update {
                ProjectFieldUpdate::Name(name) => next.name = name,
                ProjectFieldUpdate::ApplicationType(v) => props.application_type = v,
                ProjectFieldUpdate::UserBaseSize(v) => props.user_base_size = v,
                ProjectFieldUpdate::SecurityStrengthNeed(v) => props.security_strength_need = v,
                ProjectFieldUpdate::TypeOfData(v) => props.type_of_data = v,
                ProjectFieldUpdate::TypeOfUsers(v) => props.type_of_users = v,
                ProjectFieldUpdate::ComplianceRequirements(v) => props.compliance_requirements = v,
            }
        }
    }
    next
}

/// The creation dialog's state: the step sequencer plus the accumulated data.
#[derive(Debug, Clone)]
pub struct ProjectCreationForm {
    data: ProjectCreationData,
    steps: MultiStepForm<ProjectStep>,
}

impl Default for ProjectCreationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectCreationForm {
    pub fn new() -> Self {
        Self {
            data: ProjectCreationData::default(),
            steps: MultiStepForm::from_steps(PROJECT_STEPS),
        }
    }

    pub fn data(&self) -> &ProjectCreationData {
        &self.data
    }

    pub fn current_step(&self) -> &ProjectStep {
        self.steps.current_step()
    }

    pub fn step_index(&self) -> usize {
        self.steps.index()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_first_step(&self) -> bool {
        self.steps.is_first_step()
    }

    pub fn is_last_step(&self) -> bool {
        self.steps.is_last_step()
    }

    pub fn next(&mut self) {
        self.steps.next();
    }

    pub fn back(&mut self) {
        self.steps.back();
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), FormError> {
        self.steps.go_to(index)
    }

    pub fn update(&mut self, update: ProjectFieldUpdate) {
        self.data = reduce(&self.data, FormAction::Update(update));
    }

    /// Click on option `key` of `property`: toggles multi-choice fields,
    /// selects or clears single-choice ones.
    pub fn select_option(&mut self, property: PropertyKey, key: &str) -> Result<(), FormError> {
        let unknown = || FormError::UnknownOption {
            property: property.display_name().to_string(),
            key: key.to_string(),
        };
        let props = &self.data.properties;

        let update = match property {
            PropertyKey::ApplicationType => {
                let item = ApplicationType::from_key(key).ok_or_else(unknown)?;
                let current = props.application_type.as_deref().unwrap_or_default();
                ProjectFieldUpdate::ApplicationType(Some(toggle(current, item)))
            }
            PropertyKey::UserBaseSize => {
                let item = UserBaseSize::from_key(key).ok_or_else(unknown)?;
                ProjectFieldUpdate::UserBaseSize(choose(props.user_base_size, item))
            }
            PropertyKey::SecurityStrengthNeed => {
                let item = SecurityStrengthNeed::from_key(key).ok_or_else(unknown)?;
                ProjectFieldUpdate::SecurityStrengthNeed(choose(props.security_strength_need, item))
            }
            PropertyKey::TypeOfData => {
                let item = DataType::from_key(key).ok_or_else(unknown)?;
                let current = props.type_of_data.as_deref().unwrap_or_default();
                ProjectFieldUpdate::TypeOfData(Some(toggle(current, item)))
            }
            PropertyKey::TypeOfUsers => {
                let item = UserType::from_key(key).ok_or_else(unknown)?;
                let current = props.type_of_users.as_deref().unwrap_or_default();
                ProjectFieldUpdate::TypeOfUsers(Some(toggle(current, item)))
            }
            PropertyKey::ComplianceRequirements => {
                let item = ComplianceRequirement::from_key(key).ok_or_else(unknown)?;
                let current = props.compliance_requirements.as_deref().unwrap_or_default();
                ProjectFieldUpdate::ComplianceRequirements(Some(toggle(current, item)))
            }
        };

        self.update(update);
        Ok(())
    }

    /// Back to the first step with empty data.
    pub fn reset(&mut self) {
        self.steps.reset();
        self.data = reduce(&self.data, FormAction::Reset);
    }

    /// Create the project. Resets the form on success from whatever step it
    /// is on; on failure the entered data is kept.
    pub async fn submit(&mut self, backend: &dyn RecSecBackend) -> Result<(), ApiError> {
        backend.create_project(&self.data).await?;
        self.reset();
        Ok(())
    }
}
