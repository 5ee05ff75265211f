//! Project record.
//!
//! # Responsibility
//! - Define the single persisted entity of the tracker.
//! - Check record invariants before writes and after reads.
//!
//! # Invariants
//! - `id` is non-empty and never changes after creation.
//! - `analysis_progress`, `development_progress` and `testing_progress` are
//!   within `[0, 100]`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary key of a project, supplied by the user at creation time.
pub type ProjectId = String;

/// Lowest accepted progress percentage.
pub const PROGRESS_MIN: u8 = 0;
/// Highest accepted progress percentage.
pub const PROGRESS_MAX: u8 = 100;

/// One tracked project.
///
/// Free-form text fields carry whatever the user typed (trimmed by the
/// service layer); empty strings are valid values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub developer: String,
    pub complexity: String,
    pub estimation: String,
    pub analysis_progress: u8,
    pub development_progress: u8,
    pub testing_progress: u8,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

/// Invariant violations detected by [`Project::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyId,
    ProgressOutOfRange { field: &'static str, value: u8 },
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "project id cannot be empty"),
            Self::ProgressOutOfRange { field, value } => write!(
                f,
                "{field} must be within {PROGRESS_MIN}..={PROGRESS_MAX}, got {value}"
            ),
        }
    }
}

impl Error for ProjectValidationError {}

impl Project {
    /// Creates a blank project: empty text fields, zero progress.
    pub fn new(id: impl Into<ProjectId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            developer: String::new(),
            complexity: String::new(),
            estimation: String::new(),
            analysis_progress: PROGRESS_MIN,
            development_progress: PROGRESS_MIN,
            testing_progress: PROGRESS_MIN,
            start_date: String::new(),
            end_date: String::new(),
            status: String::new(),
        }
    }

    /// Checks the record invariants.
    ///
    /// Whitespace-only ids count as empty.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.id.trim().is_empty() {
            return Err(ProjectValidationError::EmptyId);
        }

        for (field, value) in self.progress_fields() {
            if value > PROGRESS_MAX {
                return Err(ProjectValidationError::ProgressOutOfRange { field, value });
            }
        }

        Ok(())
    }

    /// Progress columns paired with their field names, in schema order.
    pub fn progress_fields(&self) -> [(&'static str, u8); 3] {
        [
            ("analysis_progress", self.analysis_progress),
            ("development_progress", self.development_progress),
            ("testing_progress", self.testing_progress),
        ]
    }
}
