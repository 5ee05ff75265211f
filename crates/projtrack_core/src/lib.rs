//! Core domain logic for the project tracker.
//! This crate owns the project record invariants and the request policy that
//! front ends build on.

pub mod config;
pub mod db;
pub mod handler;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError, ConfigResult};
pub use handler::{HandlerResponse, Page, ProjectHandler};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::project::{Project, ProjectId, ProjectValidationError};
pub use repo::project_repo::{ProjectRepository, RepoError, RepoResult, SqliteProjectRepository};
pub use service::project_form::{ProjectForm, CREATE_FIELDS, EDITABLE_FIELDS};
pub use service::project_service::{
    normalize_progress, EditOutcome, ProjectService, ProjectServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
