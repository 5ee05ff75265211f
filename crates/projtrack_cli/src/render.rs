//! Plain-text and JSON rendering of handler pages.

use projtrack_core::{AppConfig, Page, Project, CREATE_FIELDS};

/// Renders a page for terminal output.
pub fn render_page(page: &Page, json: bool) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(page);
    }

    Ok(match page {
        Page::ProjectList(projects) => render_list(projects),
        Page::AddProjectForm => render_add_form(),
        Page::EditProjectForm(project) => render_detail(project),
    })
}

pub fn render_config(config: &AppConfig, json: bool) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(config);
    }

    let log_dir = config
        .log_dir
        .as_ref()
        .map_or_else(|| "stderr".to_string(), |dir| dir.display().to_string());
    Ok(format!(
        "port:          {}\ndatabase_path: {}\nlog_level:     {}\nlog_dir:       {}\n",
        config.port,
        config.database_path.display(),
        config.log_level,
        log_dir
    ))
}

fn render_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects yet.\n".to_string();
    }

    let mut out = format!(
        "{:<12} {:<24} {:<16} {:>5} {:>5} {:>5}  {}\n",
        "ID", "NAME", "DEVELOPER", "ANA%", "DEV%", "TST%", "STATUS"
    );
    for project in projects {
        out.push_str(&format!(
            "{:<12} {:<24} {:<16} {:>5} {:>5} {:>5}  {}\n",
            project.id,
            project.name,
            project.developer,
            project.analysis_progress,
            project.development_progress,
            project.testing_progress,
            project.status
        ));
    }
    out
}

fn render_add_form() -> String {
    let mut out = String::from("New project fields:\n");
    for field in CREATE_FIELDS {
        out.push_str(&format!("  --{}\n", field.replace('_', "-")));
    }
    out
}

fn render_detail(project: &Project) -> String {
    let rows = [
        ("id", project.id.clone()),
        ("name", project.name.clone()),
        ("developer", project.developer.clone()),
        ("complexity", project.complexity.clone()),
        ("estimation", project.estimation.clone()),
        ("analysis_progress", project.analysis_progress.to_string()),
        ("development_progress", project.development_progress.to_string()),
        ("testing_progress", project.testing_progress.to_string()),
        ("start_date", project.start_date.clone()),
        ("end_date", project.end_date.clone()),
        ("status", project.status.clone()),
    ];

    rows.iter()
        .map(|(label, value)| format!("{label:<21} {value}\n"))
        .collect()
}
