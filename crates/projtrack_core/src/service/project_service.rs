//! Project use-case service.
//!
//! # Responsibility
//! - Normalize raw form values (trim text, clamp progress).
//! - Provide list/get/create/edit entry points over a `ProjectRepository`.
//!
//! # Invariants
//! - Records handed to the repository always satisfy `Project::validate()`.
//! - `edit_project` never changes a project's `id`.
//! - A missing edit target is reported as `EditOutcome::NotFound` and leaves
//!   the store untouched.

use crate::model::project::{Project, ProjectId, PROGRESS_MAX, PROGRESS_MIN};
use crate::repo::project_repo::{ProjectRepository, RepoError};
use crate::service::project_form::ProjectForm;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ProjectServiceError>;

/// Service error for project use-cases.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// Create was submitted without a usable id.
    EmptyId,
    /// Record store failure, passed through unchanged.
    Repo(RepoError),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "project id is required"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::EmptyId => None,
        }
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of an edit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Updated(Project),
    /// No project exists for the requested id; nothing was written.
    NotFound(ProjectId),
}

/// Parses a user-supplied progress value into a percentage.
///
/// Surrounding whitespace and a leading `+`/`-` are accepted. Well-formed
/// integers are clamped to `[0, 100]`, including ones too large for any
/// machine integer. Everything else yields `0`.
///
/// Only ASCII digits count. Unlike Python's `int()`, digit-group underscores
/// (`1_0`) and non-ASCII decimal digits (`٤٢`, `９`) are not integers here.
pub fn normalize_progress(raw: &str) -> u8 {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return PROGRESS_MIN;
    }
    if negative {
        return PROGRESS_MIN;
    }

    let significant = digits.trim_start_matches('0');
    if significant.len() > 3 {
        return PROGRESS_MAX;
    }

    significant
        .parse::<u16>()
        .map_or(PROGRESS_MIN, |value| value.min(u16::from(PROGRESS_MAX)) as u8)
}

/// Use-case service over an owned project repository.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every stored project; empty when none exist.
    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.repo.list_projects()?)
    }

    /// Fetches one project by exact id.
    pub fn get_project(&self, id: &str) -> ServiceResult<Option<Project>> {
        Ok(self.repo.get_project(id)?)
    }

    /// Builds a project from a raw submission and inserts it.
    ///
    /// # Contract
    /// - All text fields, `id` included, are trimmed.
    /// - Progress fields pass through [`normalize_progress`].
    /// - An empty id is rejected before touching the store.
    ///
    /// # Errors
    /// - `EmptyId` for a blank id.
    /// - `Repo(RepoError::DuplicateId)` when the id is taken; other store
    ///   faults are returned as `Repo` too.
    pub fn create_project(&self, form: &ProjectForm) -> ServiceResult<Project> {
        let id = form.get("id").trim();
        if id.is_empty() {
            return Err(ProjectServiceError::EmptyId);
        }

        let mut project = Project::new(id);
        apply_form(&mut project, form);
        self.repo.insert_project(&project)?;

        info!("event=project_create module=service status=ok id={}", project.id);
        Ok(project)
    }

    /// Overwrites every field except `id` of an existing project.
    ///
    /// # Contract
    /// - The lookup uses `id` exactly as given.
    /// - An `id` entry inside `form` is ignored.
    /// - Same trim/normalize rules as [`ProjectService::create_project`].
    pub fn edit_project(&self, id: &str, form: &ProjectForm) -> ServiceResult<EditOutcome> {
        let Some(mut project) = self.repo.get_project(id)? else {
            debug!("event=project_edit module=service status=not_found id={id}");
            return Ok(EditOutcome::NotFound(id.to_string()));
        };

        apply_form(&mut project, form);
        self.repo.update_project(&project)?;

        info!("event=project_edit module=service status=ok id={}", project.id);
        Ok(EditOutcome::Updated(project))
    }
}

fn apply_form(project: &mut Project, form: &ProjectForm) {
    let text = |field: &str| form.get(field).trim().to_string();

    project.name = text("name");
    project.developer = text("developer");
    project.complexity = text("complexity");
    project.estimation = text("estimation");
    project.analysis_progress = normalize_progress(form.get("analysis_progress"));
    project.development_progress = normalize_progress(form.get("development_progress"));
    project.testing_progress = normalize_progress(form.get("testing_progress"));
    project.start_date = text("start_date");
    project.end_date = text("end_date");
    project.status = text("status");
}
