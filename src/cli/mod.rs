//! Command-line interface over the workflow library.
//!
//! Presentation only: inspecting the step catalog and the persisted
//! session slots. No workflow semantics live here.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "airwave", version, about = "Guided campaign workflow engine")]
pub struct Cli {
    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a config file (defaults to airwave.yaml plus AIRWAVE_* env)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the workflow step catalog
    Steps,
    /// Inspect or clear persisted workflow sessions
    Session(commands::session::SessionArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_steps() {
        let cli = Cli::parse_from(["airwave", "steps", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Steps));
    }

    #[test]
    fn test_parse_session_show_with_key() {
        let cli = Cli::parse_from(["airwave", "session", "show", "--key", "wf_demo"]);
        let Commands::Session(args) = cli.command else {
            panic!("expected session command");
        };
        match args.command {
            commands::session::SessionCommands::Show { key } => {
                assert_eq!(key.as_deref(), Some("wf_demo"));
            }
            commands::session::SessionCommands::Clear { .. } => panic!("expected show"),
        }
    }
}
