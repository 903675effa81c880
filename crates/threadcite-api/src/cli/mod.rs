//! CLI command definitions for the `tcite` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod config;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Ask questions of a document-grounded assistant and see where the answers come from.
#[derive(Parser)]
#[command(name = "tcite", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive conversation.
    Chat {
        /// Assistant to converse with (overrides THREADCITE_ASSISTANT_ID and config.toml).
        #[arg(long)]
        assistant: Option<String>,
    },

    /// Ask a single question and print the cited answer.
    Ask {
        /// The question to ask.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Assistant to converse with (overrides THREADCITE_ASSISTANT_ID and config.toml).
        #[arg(long)]
        assistant: Option<String>,
    },

    /// Show the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Commands {
    /// The `--assistant` override, for commands that take one.
    pub fn assistant_flag(&self) -> Option<&str> {
        match self {
            Commands::Chat { assistant } | Commands::Ask { assistant, .. } => assistant.as_deref(),
            Commands::Config | Commands::Completions { .. } => None,
        }
    }
}

/// Default log filter for the given verbosity flags.
pub fn verbosity_filter(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,threadcite_core=debug,threadcite_infra=debug",
        _ => "trace",
    }
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
    fn test_parse_ask_joins_words() {
        let cli = Cli::parse_from(["tcite", "ask", "what", "about", "the", "NHS?", "--json"]);
        assert!(cli.json);
        match cli.command {
            Commands::Ask { question, assistant } => {
                assert_eq!(question.join(" "), "what about the NHS?");
                assert!(assistant.is_none());
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_assistant_flag() {
        let cli = Cli::parse_from(["tcite", "chat", "--assistant", "asst_1"]);
        assert_eq!(cli.command.assistant_flag(), Some("asst_1"));

        let cli = Cli::parse_from(["tcite", "config"]);
        assert_eq!(cli.command.assistant_flag(), None);
    }

    #[test]
    fn test_verbosity_filter() {
        assert_eq!(verbosity_filter(0, true), "error");
        assert_eq!(verbosity_filter(0, false), "warn");
        assert!(verbosity_filter(1, false).contains("threadcite_core=debug"));
        assert_eq!(verbosity_filter(3, true), "trace");
    }
}
