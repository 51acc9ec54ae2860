//! Project directory: cached project list plus the user's current selections.
//!
//! Selections resolve against locally cached data; an id that does not
//! resolve is a [`LookupError`] the caller must handle.

use crate::api::RecSecBackend;
use crate::error::{self, LookupError};
use crate::model::{Project, ProjectOverview, SecurityControl, SecurityRequirement};

#[derive(Debug, Clone, Default)]
pub struct ProjectDirectory {
    projects: Vec<ProjectOverview>,
    selected_project: Option<Project>,
    selected_requirement: Option<SecurityRequirement>,
    selected_control: Option<SecurityControl>,
}

impl ProjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the project list.
    pub async fn refresh(&mut self, backend: &dyn RecSecBackend) -> error::Result<()> {
        self.projects = backend.list_projects().await?;
        tracing::debug!(count = self.projects.len(), "Project list refreshed");
        Ok(())
    }

    pub fn projects(&self) -> &[ProjectOverview] {
        &self.projects
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_project.as_ref()
    }

    pub fn selected_security_requirement(&self) -> Option<&SecurityRequirement> {
        self.selected_requirement.as_ref()
    }

    pub fn selected_security_control(&self) -> Option<&SecurityControl> {
        self.selected_control.as_ref()
    }

    /// Select a listed project and load its details.
    pub async fn select_project(
        &mut self,
        backend: &dyn RecSecBackend,
        project_id: i64,
    ) -> error::Result<&Project> {
        if !self.projects.iter().any(|p| p.id == project_id) {
            return Err(LookupError::ProjectNotFound(project_id).into());
        }
        let project = backend.get_project(project_id).await?;
        if self
            .selected_project
            .as_ref()
            .is_some_and(|current| current.id != project.id)
        {
            self.selected_requirement = None;
        }
        Ok(&*self.selected_project.insert(project))
    }

    pub fn select_security_requirement(
        &mut self,
        requirement_id: i64,
    ) -> Result<&SecurityRequirement, LookupError> {
        let project = self
            .selected_project
            .as_ref()
            .ok_or(LookupError::NoProjectSelected)?;
        let requirement = project
            .security_requirements
            .iter()
            .find(|r| r.id == requirement_id)
            .cloned()
            .ok_or(LookupError::SecurityRequirementNotFound(requirement_id))?;
        Ok(&*self.selected_requirement.insert(requirement))
    }

    pub fn select_security_control(
        &mut self,
        control_id: i64,
    ) -> Result<&SecurityControl, LookupError> {
        let control =
            SecurityControl::known(control_id).ok_or(LookupError::UnknownSecurityControl(control_id))?;
        Ok(&*self.selected_control.insert(control))
    }
}
