//! Threadcite CLI entry point.
//!
//! Binary name: `tcite`
//!
//! Parses CLI arguments, installs tracing, resolves configuration, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = cli::verbosity_filter(cli.verbose, cli.quiet);
    threadcite_observe::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    threadcite_observe::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "tcite", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.command.assistant_flag()).await?;

    match &cli.command {
        Commands::Chat { .. } => {
            cli::chat::loop_runner::run_chat_loop(&state).await?;
        }
        Commands::Ask { question, .. } => {
            cli::ask::ask(&state, &question.join(" "), cli.json, cli.quiet).await?;
        }
        Commands::Config => {
            cli::config::show_config(&state, cli.json)?;
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
