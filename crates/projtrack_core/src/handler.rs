//! Request handling policy for the project tracker front ends.
//!
//! # Responsibility
//! - Map list/add/edit requests onto service calls.
//! - Decide between rendering a page and redirecting to the project list.
//!
//! # Invariants
//! - Successful submissions always redirect to the list.
//! - A missing edit target redirects to the list without an error.
//! - Store failures are returned to the caller unchanged.

use crate::model::project::Project;
use crate::repo::project_repo::ProjectRepository;
use crate::service::project_form::ProjectForm;
use crate::service::project_service::{EditOutcome, ProjectService, ServiceResult};
use serde::Serialize;

/// Page content handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "data", rename_all = "snake_case")]
pub enum Page {
    ProjectList(Vec<Project>),
    AddProjectForm,
    EditProjectForm(Project),
}

/// What a front end should do after a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    Render(Page),
    RedirectToList,
}

/// Front-end facing request handler wrapping a [`ProjectService`].
pub struct ProjectHandler<R: ProjectRepository> {
    service: ProjectService<R>,
}

impl<R: ProjectRepository> ProjectHandler<R> {
    pub fn new(service: ProjectService<R>) -> Self {
        Self { service }
    }

    /// Dashboard: every stored project.
    pub fn index(&self) -> ServiceResult<HandlerResponse> {
        let projects = self.service.list_projects()?;
        Ok(HandlerResponse::Render(Page::ProjectList(projects)))
    }

    /// Blank creation form.
    pub fn add_form(&self) -> HandlerResponse {
        HandlerResponse::Render(Page::AddProjectForm)
    }

    pub fn submit_add(&self, form: &ProjectForm) -> ServiceResult<HandlerResponse> {
        self.service.create_project(form)?;
        Ok(HandlerResponse::RedirectToList)
    }

    /// Edit form pre-filled with the stored project, or the list when absent.
    pub fn edit_form(&self, id: &str) -> ServiceResult<HandlerResponse> {
        Ok(match self.service.get_project(id)? {
            Some(project) => HandlerResponse::Render(Page::EditProjectForm(project)),
            None => HandlerResponse::RedirectToList,
        })
    }

    pub fn submit_edit(&self, id: &str, form: &ProjectForm) -> ServiceResult<HandlerResponse> {
        match self.service.edit_project(id, form)? {
            EditOutcome::Updated(_) | EditOutcome::NotFound(_) => {
                Ok(HandlerResponse::RedirectToList)
            }
        }
    }
}
