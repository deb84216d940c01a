//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Build yes/no decision trees that tell cards apart with the fewest questions
#[derive(Parser, Debug)]
#[command(name = "cardtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory holding .cardtree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the decision tree and report question usage
    Build {
        /// Card data file (JSON array)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        cards: Option<PathBuf>,
        /// Output file for the tree
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Score candidate questions in parallel
        #[arg(long)]
        parallel: bool,
        /// Skip the duplicate card name check
        #[arg(long)]
        trust_names: bool,
    },

    /// List the generated question catalog in asking order
    Questions {
        /// Card data file used to mine type and keyword questions
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        cards: Option<PathBuf>,
    },

    /// Render a saved decision tree
    Show {
        /// Tree file (default: configured output file)
        #[arg(value_hint = ValueHint::FilePath)]
        tree: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_build_flags_when_parsing_then_captured() {
        let cli = Cli::try_parse_from([
            "cardtree", "-dd", "build", "--cards", "cards.json", "--parallel",
        ])
        .unwrap();

        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Build {
                cards,
                output,
                parallel,
                trust_names,
            }) => {
                assert_eq!(cards, Some(PathBuf::from("cards.json")));
                assert!(output.is_none());
                assert!(parallel);
                assert!(!trust_names);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
