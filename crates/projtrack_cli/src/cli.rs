//! Command-line definitions for `projtrack`.

use clap::{Args, Parser, Subcommand};
use projtrack_core::ProjectForm;
use std::path::PathBuf;

/// projtrack - track project progress from the terminal
#[derive(Debug, Parser)]
#[command(name = "projtrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database file, overriding configuration
    #[arg(short, long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every project
    List(OutputArgs),

    /// Create a project; without fields, show the blank form
    Add(AddCommand),

    /// Show one project as it would appear in the edit form
    Show {
        id: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Overwrite every field of an existing project except its id
    Edit(EditCommand),

    /// Print the effective configuration
    Config(OutputArgs),
}

#[derive(Debug, Clone, Copy, Args)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct AddCommand {
    /// Unique project id
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the project to edit
    pub id: String,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Raw field values; omitted flags are submitted as empty.
#[derive(Debug, Default, Args)]
pub struct FieldArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub developer: Option<String>,
    #[arg(long)]
    pub complexity: Option<String>,
    #[arg(long)]
    pub estimation: Option<String>,
    /// Analysis progress in percent (0-100)
    #[arg(long, allow_hyphen_values = true)]
    pub analysis_progress: Option<String>,
    /// Development progress in percent (0-100)
    #[arg(long, allow_hyphen_values = true)]
    pub development_progress: Option<String>,
    /// Testing progress in percent (0-100)
    #[arg(long, allow_hyphen_values = true)]
    pub testing_progress: Option<String>,
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

impl FieldArgs {
    fn pairs(&self) -> [(&'static str, Option<&String>); 10] {
        [
            ("name", self.name.as_ref()),
            ("developer", self.developer.as_ref()),
            ("complexity", self.complexity.as_ref()),
            ("estimation", self.estimation.as_ref()),
            ("analysis_progress", self.analysis_progress.as_ref()),
            ("development_progress", self.development_progress.as_ref()),
            ("testing_progress", self.testing_progress.as_ref()),
            ("start_date", self.start_date.as_ref()),
            ("end_date", self.end_date.as_ref()),
            ("status", self.status.as_ref()),
        ]
    }

    /// Builds a form containing only the flags that were given.
    pub fn to_form(&self) -> ProjectForm {
        self.pairs()
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| (field, value.clone())))
            .collect()
    }
}

impl AddCommand {
    pub fn to_form(&self) -> ProjectForm {
        let mut form = self.fields.to_form();
        if let Some(id) = &self.id {
            form.insert("id", id.clone());
        }
        form
    }
}

impl Cli {
    /// Log level implied by `-q` / `-v`, or `None` to use configuration.
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_collects_only_given_fields() {
        let cli = Cli::parse_from([
            "projtrack",
            "add",
            "--id",
            " P1 ",
            "--name",
            "Foo",
            "--testing-progress",
            "-5",
        ]);
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };

        let form = add.to_form();
        assert_eq!(form.get("id"), " P1 ");
        assert_eq!(form.get("name"), "Foo");
        assert_eq!(form.get("testing_progress"), "-5");
        assert!(!form.contains("developer"));
    }

    #[test]
    fn add_without_flags_yields_empty_form() {
        let cli = Cli::parse_from(["projtrack", "add"]);
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert!(add.to_form().is_empty());
    }

    #[test]
    fn edit_takes_positional_id_and_never_puts_it_in_form() {
        let cli = Cli::parse_from(["projtrack", "edit", "P1", "--status", "done"]);
        let Command::Edit(edit) = cli.command else {
            panic!("expected edit command");
        };
        assert_eq!(edit.id, "P1");
        let form = edit.fields.to_form();
        assert_eq!(form.get("status"), "done");
        assert!(!form.contains("id"));
    }

    #[test]
    fn verbosity_flags_map_to_log_levels() {
        assert_eq!(
            Cli::parse_from(["projtrack", "list"]).log_level_override(),
            None
        );
        assert_eq!(
            Cli::parse_from(["projtrack", "-vv", "list"]).log_level_override(),
            Some("trace")
        );
        assert_eq!(
            Cli::parse_from(["projtrack", "list", "-q"]).log_level_override(),
            Some("error")
        );
    }
}
