//! Terminal rendering of replies and their sources.

use console::style;
use threadcite_types::chat::{ChatEntry, Reply, Sender, SourceReference};

/// Source lines as `- <file>, Page: <n|Unknown>`, sorted for stable display.
pub fn source_lines(sources: &[SourceReference]) -> Vec<String> {
    let mut sorted: Vec<&SourceReference> = sources.iter().collect();
    sorted.sort();
    sorted.into_iter().map(|source| format!("- {source}")).collect()
}

/// Print an assistant reply followed by its sources.
pub fn print_reply(reply: &Reply) {
    println!();
    println!("  {} {}", style("Assistant").cyan().bold(), reply.text.trim());
    print_sources(&reply.sources);
    println!();
}

fn print_sources(sources: &[SourceReference]) {
    if sources.is_empty() {
        return;
    }
    println!();
    println!("  {}", style("Sources:").bold());
    for line in source_lines(sources) {
        println!("  {}", style(line).dim());
    }
}

/// Print a non-fatal error notice.
pub fn print_notice(notice: &str) {
    eprintln!("\n  {} {notice}", style("!").red().bold());
    eprintln!("  {}", style("Type a message to retry, /exit to quit.").dim());
}

/// Print the conversation so far.
pub fn print_history(entries: &[ChatEntry]) {
    println!();
    if entries.is_empty() {
        println!("  {}", style("No messages yet.").dim());
        println!();
        return;
    }
    for entry in entries {
        let label = match entry.sender {
            Sender::You => style(entry.sender.label()).green().bold(),
            Sender::Assistant => style(entry.sender.label()).cyan().bold(),
        };
        println!("  {label} {}", entry.text.trim());
        print_sources(&entry.sources);
    }
    println!();
}
