//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, ConfigCommand, PlacementArgs, SortArgs, TodoCommand};
pub use output::{format_agenda, format_config, format_tag_list, format_todo_list};
