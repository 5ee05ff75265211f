use projtrack_core::db::open_db_in_memory;
use projtrack_core::{
    HandlerResponse, Page, ProjectForm, ProjectHandler, ProjectService, ProjectServiceError,
    RepoError, SqliteProjectRepository,
};
use rusqlite::Connection;

fn handler(conn: &Connection) -> ProjectHandler<SqliteProjectRepository<'_>> {
    let repo = SqliteProjectRepository::try_new(conn).unwrap();
    ProjectHandler::new(ProjectService::new(repo))
}

fn listed_ids(response: HandlerResponse) -> Vec<String> {
    match response {
        HandlerResponse::Render(Page::ProjectList(projects)) => {
            projects.into_iter().map(|project| project.id).collect()
        }
        other => panic!("expected project list, got {other:?}"),
    }
}

#[test]
fn index_renders_empty_list_for_new_store() {
    let conn = open_db_in_memory().unwrap();
    let handler = handler(&conn);

    assert_eq!(
        handler.index().unwrap(),
        HandlerResponse::Render(Page::ProjectList(Vec::new()))
    );
}

#[test]
fn add_form_renders_blank_form() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(
        handler(&conn).add_form(),
        HandlerResponse::Render(Page::AddProjectForm)
    );
}

#[test]
fn submit_add_redirects_to_list_showing_new_project() {
    let conn = open_db_in_memory().unwrap();
    let handler = handler(&conn);

    let form = ProjectForm::new().with("id", "P1").with("name", "Foo");
    assert_eq!(
        handler.submit_add(&form).unwrap(),
        HandlerResponse::RedirectToList
    );
    assert_eq!(listed_ids(handler.index().unwrap()), ["P1"]);
}

#[test]
fn submit_add_with_duplicate_id_surfaces_store_error() {
    let conn = open_db_in_memory().unwrap();
    let handler = handler(&conn);

    let form = ProjectForm::new().with("id", "P1");
    handler.submit_add(&form).unwrap();

    let err = handler.submit_add(&form).unwrap_err();
    assert!(matches!(
        err,
        ProjectServiceError::Repo(RepoError::DuplicateId(_))
    ));
}

#[test]
fn edit_form_renders_stored_project() {
    let conn = open_db_in_memory().unwrap();
    let handler = handler(&conn);
    handler
        .submit_add(&ProjectForm::new().with("id", "P1").with("name", "Foo"))
        .unwrap();

    match handler.edit_form("P1").unwrap() {
        HandlerResponse::Render(Page::EditProjectForm(project)) => {
            assert_eq!(project.id, "P1");
            assert_eq!(project.name, "Foo");
        }
        other => panic!("expected edit form, got {other:?}"),
    }
}

#[test]
fn edit_form_for_missing_project_redirects_to_list() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(
        handler(&conn).edit_form("ghost").unwrap(),
        HandlerResponse::RedirectToList
    );
}

#[test]
fn submit_edit_redirects_whether_or_not_project_exists() {
    let conn = open_db_in_memory().unwrap();
    let handler = handler(&conn);
    handler
        .submit_add(&ProjectForm::new().with("id", "P1"))
        .unwrap();

    let edit = ProjectForm::new().with("status", "done");
    assert_eq!(
        handler.submit_edit("P1", &edit).unwrap(),
        HandlerResponse::RedirectToList
    );
    assert_eq!(
        handler.submit_edit("ghost", &edit).unwrap(),
        HandlerResponse::RedirectToList
    );
    assert_eq!(listed_ids(handler.index().unwrap()), ["P1"]);
}

#[test]
fn pages_serialize_with_page_tag() {
    let value = serde_json::to_value(Page::AddProjectForm).unwrap();
    assert_eq!(value, serde_json::json!({ "page": "add_project_form" }));

    let list = serde_json::to_value(Page::ProjectList(Vec::new())).unwrap();
    assert_eq!(
        list,
        serde_json::json!({ "page": "project_list", "data": [] })
    );
}
