//! Welcome banner display for chat sessions.

use console::style;
use threadcite_types::session::Session;

/// Print the welcome banner once the session is provisioned.
pub fn print_welcome_banner(session: &Session) {
    println!();
    println!("  {}", style("threadcite").cyan().bold());
    println!(
        "  {}",
        style("Answers come with the documents and pages they cite.").dim()
    );
    println!();
    println!("  {}  {}", style("Assistant:").bold(), style(&session.assistant_id).dim());
    println!("  {}     {}", style("Thread:").bold(), style(&session.thread_id).dim());
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
