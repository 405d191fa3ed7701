//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orgenda")]
#[command(about = "Query and edit org-style outline files from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List, add, complete and edit tasks
    Todo {
        #[command(subcommand)]
        command: TodoCommand,
    },

    /// Show dated entries for a day, week or month
    Agenda {
        /// Span to show (day, week, month)
        #[arg(short, long, default_value = "day")]
        range: String,

        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Only entries carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        #[command(flatten)]
        sort: SortArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Capture text into an org file using the configured template
    Capture {
        /// Text to capture (multiple words are joined with spaces)
        #[arg(required = true, value_name = "CONTENT")]
        content: Vec<String>,

        #[command(flatten)]
        placement: PlacementArgs,
    },

    /// List all tags used across org files
    Tags,

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Serve tools as line-delimited JSON over stdin/stdout
    Serve,
}

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    /// List tasks
    List {
        /// Only this status (TODO, WAITING, DONE)
        #[arg(short, long)]
        status: Option<String>,

        /// Only tasks carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        #[command(flatten)]
        sort: SortArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add a new TODO
    Add {
        /// Task title
        title: String,

        /// Single-letter priority (A, B, C)
        #[arg(short, long)]
        priority: Option<String>,

        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,

        /// Scheduled date (YYYY-MM-DD)
        #[arg(short, long)]
        schedule: Option<String>,

        /// Deadline date (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,

        #[command(flatten)]
        placement: PlacementArgs,
    },

    /// Mark a task as DONE
    Done {
        /// Entry location as FILE:LINE
        #[arg(value_name = "FILE:LINE")]
        location: String,
    },

    /// Change fields of an existing entry
    Edit {
        /// Entry location as FILE:LINE
        #[arg(value_name = "FILE:LINE")]
        location: String,

        /// New status, or "none" to clear it
        #[arg(long)]
        status: Option<String>,

        /// New priority, or "none" to clear it
        #[arg(long)]
        priority: Option<String>,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// Replacement comma-separated tags (empty string clears them)
        #[arg(long)]
        tags: Option<String>,

        /// New scheduled date (YYYY-MM-DD)
        #[arg(long)]
        schedule: Option<String>,

        /// New deadline date (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show all configuration
    List,

    /// Add a file or directory to org_files
    AddPath { path: String },

    /// Remove a file or directory from org_files
    RemovePath { path: String },

    /// Print one value
    Get { key: String },

    /// Set one value (empty string clears it)
    Set { key: String, value: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SortArgs {
    /// Sort key (priority, date, status)
    #[arg(long)]
    pub sort: Option<String>,

    /// Reverse the sort order
    #[arg(long)]
    pub desc: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlacementArgs {
    /// Target org file
    #[arg(short, long)]
    pub file: Option<String>,

    /// Insert under the first heading with this title
    #[arg(long, conflicts_with = "olp")]
    pub heading: Option<String>,

    /// Insert under this outline path (repeat for each level)
    #[arg(long)]
    pub olp: Vec<String>,

    /// Insert at the top instead of the bottom
    #[arg(long)]
    pub prepend: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_todo_add() {
        let cli = Cli::try_parse_from([
            "orgenda", "todo", "add", "Pay rent", "-p", "a", "--tags", "home", "--olp", "Inbox",
            "--olp", "Bills",
        ])
        .unwrap();
        match cli.command {
            Commands::Todo {
                command:
                    TodoCommand::Add {
                        title,
                        priority,
                        placement,
                        ..
                    },
            } => {
                assert_eq!(title, "Pay rent");
                assert_eq!(priority.as_deref(), Some("a"));
                assert_eq!(placement.olp, vec!["Inbox", "Bills"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_heading_conflicts_with_olp() {
        let result = Cli::try_parse_from([
            "orgenda", "capture", "x", "--heading", "A", "--olp", "B",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["orgenda", "tags", "--verbose", "--config", "/c.toml"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/c.toml")));
    }
}
