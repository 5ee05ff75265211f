//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/get/list/update over the `projects` table.
//! - Translate primary-key conflicts into a semantic error.
//!
//! # Invariants
//! - Writes validate the record first.
//! - Reads reject persisted rows that break `Project` invariants instead of
//!   masking them.
//! - `list_projects` returns rows in insertion order.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::project::{Project, ProjectId, ProjectValidationError};
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    developer,
    complexity,
    estimation,
    analysis_progress,
    development_progress,
    testing_progress,
    start_date,
    end_date,
    status
FROM projects";

const PROJECT_COLUMNS: [&str; 11] = [
    "id",
    "name",
    "developer",
    "complexity",
    "estimation",
    "analysis_progress",
    "development_progress",
    "testing_progress",
    "start_date",
    "end_date",
    "status",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Record store error for project persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProjectValidationError),
    Db(DbError),
    /// Update target does not exist.
    NotFound(ProjectId),
    /// Insert collided with an existing primary key.
    DuplicateId(ProjectId),
    /// Persisted row cannot be converted into a valid `Project`.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::DuplicateId(id) => write!(f, "project id already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted project data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Keyed record store for projects.
pub trait ProjectRepository {
    fn insert_project(&self, project: &Project) -> RepoResult<()>;
    fn get_project(&self, id: &str) -> RepoResult<Option<Project>>;
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn update_project(&self, project: &Project) -> RepoResult<()>;
}

/// SQLite-backed project repository borrowing a migrated connection.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Wraps a connection after checking it carries the projects schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for a foreign schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_project_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn insert_project(&self, project: &Project) -> RepoResult<()> {
        project.validate()?;

        let result = self.conn.execute(
            "INSERT INTO projects (
                id,
                name,
                developer,
                complexity,
                estimation,
                analysis_progress,
                development_progress,
                testing_progress,
                start_date,
                end_date,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                project.id.as_str(),
                project.name.as_str(),
                project.developer.as_str(),
                project.complexity.as_str(),
                project.estimation.as_str(),
                project.analysis_progress,
                project.development_progress,
                project.testing_progress,
                project.start_date.as_str(),
                project.end_date.as_str(),
                project.status.as_str(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_primary_key_conflict(&err) => {
                Err(RepoError::DuplicateId(project.id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_project(&self, id: &str) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_project_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        project.validate()?;

        let changed = self.conn.execute(
            "UPDATE projects
             SET
                name = ?1,
                developer = ?2,
                complexity = ?3,
                estimation = ?4,
                analysis_progress = ?5,
                development_progress = ?6,
                testing_progress = ?7,
                start_date = ?8,
                end_date = ?9,
                status = ?10
             WHERE id = ?11;",
            params![
                project.name.as_str(),
                project.developer.as_str(),
                project.complexity.as_str(),
                project.estimation.as_str(),
                project.analysis_progress,
                project.development_progress,
                project.testing_progress,
                project.start_date.as_str(),
                project.end_date.as_str(),
                project.status.as_str(),
                project.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(project.id.clone()));
        }

        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let project = Project {
        id: row.get("id")?,
        name: read_text(row, "name")?,
        developer: read_text(row, "developer")?,
        complexity: read_text(row, "complexity")?,
        estimation: read_text(row, "estimation")?,
        analysis_progress: read_progress(row, "analysis_progress")?,
        development_progress: read_progress(row, "development_progress")?,
        testing_progress: read_progress(row, "testing_progress")?,
        start_date: read_text(row, "start_date")?,
        end_date: read_text(row, "end_date")?,
        status: read_text(row, "status")?,
    };

    project.validate().map_err(|err| {
        RepoError::InvalidData(format!("project `{}` violates invariants: {err}", project.id))
    })?;
    Ok(project)
}

// Tables adopted from the legacy web app allow NULL in every column.
fn read_text(row: &Row<'_>, column: &'static str) -> RepoResult<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn read_progress(row: &Row<'_>, column: &'static str) -> RepoResult<u8> {
    let value = row.get::<_, Option<i64>>(column)?.unwrap_or(0);
    u8::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid progress value `{value}` in projects.{column}"))
    })
}

fn is_primary_key_conflict(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn ensure_project_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "projects")? {
        return Err(RepoError::MissingRequiredTable("projects"));
    }

    for column in PROJECT_COLUMNS {
        if !table_has_column(conn, "projects", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "projects",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
