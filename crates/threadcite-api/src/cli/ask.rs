//! One-shot question: a single turn on a fresh thread.

use console::style;

use crate::state::AppState;

use super::chat::renderer::{print_reply, source_lines};
use super::chat::thinking_spinner;

/// Ask `question` and print the cited answer.
pub async fn ask(state: &AppState, question: &str, json: bool, quiet: bool) -> anyhow::Result<()> {
    let service = state.chat_service()?;

    let spinner = (!json && !quiet).then(|| thinking_spinner("thinking..."));
    let reply = service.ask(question).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let reply = reply?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else if quiet {
        println!("{}", reply.text.trim());
        for line in source_lines(&reply.sources) {
            println!("{line}");
        }
    } else if reply.is_empty() {
        println!(
            "\n  {} The assistant did not produce a reply.\n",
            style("!").yellow().bold()
        );
    } else {
        print_reply(&reply);
    }

    Ok(())
}
