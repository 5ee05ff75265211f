//! `projtrack` command-line front end.
//!
//! # Responsibility
//! - Load configuration, open the projects database and drive the request
//!   handler.
//! - Follow redirects to the project list the way a browser would.

mod cli;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use log::error;
use projtrack_core::db::open_db;
use projtrack_core::{
    init_logging, init_stderr_logging, logging_status, AppConfig, HandlerResponse, ProjectHandler,
    ProjectService, SqliteProjectRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Configuration errors surface before any logger exists.
            if logger_ready() {
                error!("event=cli_exit module=cli status=error error={err}");
            }
            eprintln!("projtrack: {err}");
            ExitCode::FAILURE
        }
    }
}

fn logger_ready() -> bool {
    logging_status().is_some()
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    if let Some(database) = &cli.database {
        config.database_path = database.clone();
    }

    let level = cli
        .log_level_override()
        .unwrap_or(config.log_level.as_str());
    match &config.log_dir {
        Some(dir) => init_logging(level, &dir.to_string_lossy())?,
        None => init_stderr_logging(level)?,
    }

    if let Command::Config(output) = &cli.command {
        print!("{}", render::render_config(&config, output.json)?);
        return Ok(());
    }

    let conn = open_db(&config.database_path)?;
    let handler = ProjectHandler::new(ProjectService::new(SqliteProjectRepository::try_new(
        &conn,
    )?));

    let (response, json) = match &cli.command {
        Command::List(output) => (handler.index()?, output.json),
        Command::Add(add) => {
            let form = add.to_form();
            if form.is_empty() {
                (handler.add_form(), false)
            } else {
                (handler.submit_add(&form)?, false)
            }
        }
        Command::Show { id, output } => (handler.edit_form(id)?, output.json),
        Command::Edit(edit) => (handler.submit_edit(&edit.id, &edit.fields.to_form())?, false),
        Command::Config(_) => return Ok(()),
    };

    let page = match response {
        HandlerResponse::Render(page) => page,
        HandlerResponse::RedirectToList => match handler.index()? {
            HandlerResponse::Render(page) => page,
            HandlerResponse::RedirectToList => return Ok(()),
        },
    };
    print!("{}", render::render_page(&page, json)?);
    Ok(())
}
