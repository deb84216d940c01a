//! CLI layer: argument parsing, command dispatch and report output

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod render;

pub use args::{Cli, Commands, ConfigCommands};
pub use commands::execute;
pub use error::{CliError, CliResult};
