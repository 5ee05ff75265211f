//! Schema migrations for the projects database.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - All pending migrations run in one transaction; the applied version is
//!   mirrored to `PRAGMA user_version`.
//! - A database written by the legacy web app (table `project`, version 0)
//!   keeps its rows: the table is renamed to `projects` before migration 1.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, OptionalExtension};

/// Table name used by the legacy web app for the same records.
pub const LEGACY_PROJECT_TABLE: &str = "project";

#[derive(Clone, Copy)]
struct Migration {
    version: u32,
    /// Runs inside the migration transaction before `sql`.
    prepare: Option<fn(&Connection) -> rusqlite::Result<()>>,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    prepare: Some(adopt_legacy_project_table),
    sql: include_str!("0001_projects.sql"),
}];

/// Returns the latest schema version known by this build.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file is newer than this build.
/// - `DbError::Sqlite` when a migration statement fails; nothing is applied.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS
        .iter()
        .filter(|migration| migration.version > current_version)
    {
        if let Some(prepare) = migration.prepare {
            prepare(&tx)?;
        }
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn adopt_legacy_project_table(conn: &Connection) -> rusqlite::Result<()> {
    if !table_exists(conn, LEGACY_PROJECT_TABLE)? || table_exists(conn, "projects")? {
        return Ok(());
    }

    conn.execute_batch(&format!(
        "ALTER TABLE {LEGACY_PROJECT_TABLE} RENAME TO projects;"
    ))?;
    info!("event=db_migrate module=db status=ok action=adopt_legacy_table table={LEGACY_PROJECT_TABLE}");
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}
