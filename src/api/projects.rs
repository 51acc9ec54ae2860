//! `/projects` endpoints.

use reqwest::Method;

use crate::error::ApiError;
use crate::model::{
    Project, ProjectCreationData, ProjectOverview, SecurityRequirementCreationRequest,
};

use super::ApiClient;

impl ApiClient {
    /// `GET /projects`: overviews of the caller's projects.
    pub async fn list_projects(&self) -> Result<Vec<ProjectOverview>, ApiError> {
        let builder = self.request(Method::GET, "/projects");
        self.send_json("GET projects", builder).await
    }

    /// `GET /projects/{id}`.
    pub async fn get_project(&self, project_id: i64) -> Result<Project, ApiError> {
        let operation = format!("GET project {project_id}");
        let builder = self.request(Method::GET, &format!("/projects/{project_id}"));
        self.send_json(&operation, builder).await
    }

    /// `POST /projects` with `{name, properties}`.
    pub async fn create_project(&self, data: &ProjectCreationData) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/projects").json(data);
        self.send("POST project", builder).await?;
        tracing::info!(name = %data.name, "Project created");
        Ok(())
    }

    /// `DELETE /projects/{id}`.
    pub async fn delete_project(&self, project_id: i64) -> Result<(), ApiError> {
        let operation = format!("DELETE project {project_id}");
        let builder = self.request(Method::DELETE, &format!("/projects/{project_id}"));
        self.send(&operation, builder).await?;
        Ok(())
    }

    /// `POST /projects/{id}/security-requirements`.
    pub async fn create_security_requirement(
        &self,
        project_id: i64,
        request: &SecurityRequirementCreationRequest,
    ) -> Result<(), ApiError> {
        let operation = format!("POST security requirement for project {project_id}");
        let builder = self
            .request(
                Method::POST,
                &format!("/projects/{project_id}/security-requirements"),
            )
            .json(request);
        self.send(&operation, builder).await?;
        Ok(())
    }

    /// `PUT /projects/{id}/security-requirements/{requirementId}`.
    pub async fn update_security_requirement(
        &self,
        project_id: i64,
        requirement_id: i64,
        request: &SecurityRequirementCreationRequest,
    ) -> Result<(), ApiError> {
        let operation =
            format!("PUT security requirement {requirement_id} for project {project_id}");
        let builder = self
            .request(
                Method::PUT,
                &format!("/projects/{project_id}/security-requirements/{requirement_id}"),
            )
            .json(request);
        self.send(&operation, builder).await?;
        Ok(())
    }

    /// `DELETE /projects/{id}/security-requirements/{requirementId}`.
    pub async fn delete_security_requirement(
        &self,
        project_id: i64,
        requirement_id: i64,
    ) -> Result<(), ApiError> {
        let operation =
            format!("DELETE security requirement {requirement_id} for project {project_id}");
        let builder = self.request(
            Method::DELETE,
            &format!("/projects/{project_id}/security-requirements/{requirement_id}"),
        );
        self.send(&operation, builder).await?;
        Ok(())
    }
}
