use projtrack_core::db::migrations::{latest_version, LEGACY_PROJECT_TABLE};
use projtrack_core::db::{open_db, open_db_in_memory, DbError};
use projtrack_core::{Project, ProjectRepository, SqliteProjectRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "projects");
}

#[test]
fn projects_table_has_legacy_column_set() {
    let conn = open_db_in_memory().unwrap();

    let mut stmt = conn.prepare("PRAGMA table_info(projects);").unwrap();
    let columns: Vec<(String, String, i64)> = stmt
        .query_map([], |row| Ok((row.get(1)?, row.get(2)?, row.get(5)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    let names: Vec<&str> = columns.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(
        names,
        [
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
        ]
    );

    let (_, id_type, id_pk) = &columns[0];
    assert_eq!(id_type, "VARCHAR(50)");
    assert_eq!(*id_pk, 1);
    for (name, column_type, _) in &columns {
        if name.ends_with("_progress") {
            assert_eq!(column_type, "INTEGER", "column {name}");
        }
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO projects (id, name) VALUES ('P1', 'kept');", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let name: String = conn_second
        .query_row("SELECT name FROM projects WHERE id = 'P1';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "kept");
}

#[test]
fn opening_legacy_web_app_database_keeps_its_projects() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE project (
                id VARCHAR(50) NOT NULL,
                name VARCHAR(100),
                developer VARCHAR(100),
                complexity VARCHAR(50),
                estimation VARCHAR(50),
                analysis_progress INTEGER,
                development_progress INTEGER,
                testing_progress INTEGER,
                start_date VARCHAR(20),
                end_date VARCHAR(20),
                status VARCHAR(50),
                PRIMARY KEY (id)
            );
            INSERT INTO project (id, name, developer, analysis_progress, status)
            VALUES ('legacy', 'Old site', 'sam', 80, 'active');",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_table_missing(&conn, LEGACY_PROJECT_TABLE);

    let repo = SqliteProjectRepository::try_new(&conn).unwrap();
    let projects = repo.list_projects().unwrap();
    let mut expected = Project::new("legacy");
    expected.name = "Old site".to_string();
    expected.developer = "sam".to_string();
    expected.analysis_progress = 80;
    expected.status = "active".to_string();
    assert_eq!(projects, vec![expected]);

    let mut edited = projects[0].clone();
    edited.testing_progress = 10;
    repo.update_project(&edited).unwrap();
    assert_eq!(repo.get_project("legacy").unwrap(), Some(edited));
}

#[test]
fn legacy_table_is_left_alone_when_projects_table_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE project (id VARCHAR(50) PRIMARY KEY NOT NULL, name VARCHAR(100));
         CREATE TABLE projects (id VARCHAR(50) PRIMARY KEY NOT NULL, name VARCHAR(100));",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_table_exists(&conn, LEGACY_PROJECT_TABLE);
    assert_table_exists(&conn, "projects");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

fn assert_table_missing(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 0, "table {table_name} should not exist");
}
