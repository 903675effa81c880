//! Main chat loop orchestration.
//!
//! Provisions the session up front, prints the banner, then reads lines
//! until EOF or `/exit`. Each non-command line is one turn.

use anyhow::anyhow;
use console::style;
use tracing::info;

use threadcite_core::chat::conversation::{Conversation, SubmitOutcome};

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{print_history, print_notice, print_reply};
use super::thinking_spinner;

/// Run the interactive chat loop.
///
/// Returns an error only when the session cannot be provisioned; every
/// other failure is printed and the loop continues.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let service = state.chat_service()?;

    let spinner = thinking_spinner("connecting...");
    let session = service.session().await;
    spinner.finish_and_clear();
    let session = session?;
    print_welcome_banner(&session);

    let mut conversation = Conversation::new(service);

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => text,
        };
        if text.is_empty() {
            continue;
        }

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => chat_input.clear(),
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::History => print_history(conversation.history().entries()),
                ChatCommand::Reset => match conversation.reset().await {
                    Ok(Some(fresh)) => {
                        info!(thread.id = %fresh.thread_id, "Conversation reset");
                        println!(
                            "\n  {} Started a fresh conversation ({})\n",
                            style("*").cyan().bold(),
                            style(&fresh.thread_id).dim()
                        );
                    }
                    Ok(None) => {
                        println!("\n  {} History cleared.\n", style("*").cyan().bold());
                    }
                    Err(e) => print_notice(&format!("An error occurred: {e}")),
                },
                ChatCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            continue;
        }

        let spinner = thinking_spinner("thinking...");
        let outcome = conversation.submit(&text).await;
        spinner.finish_and_clear();

        match outcome {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Answered(reply) if reply.is_empty() => {
                println!(
                    "\n  {} The assistant did not produce a reply.\n",
                    style("!").yellow().bold()
                );
            }
            SubmitOutcome::Answered(reply) => print_reply(&reply),
            SubmitOutcome::Failed { notice } => print_notice(&notice),
            SubmitOutcome::Fatal { notice } => return Err(anyhow!(notice)),
        }
    }

    Ok(())
}
