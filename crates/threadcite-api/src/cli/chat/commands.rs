//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and control the session and the display.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Forget the conversation and start a fresh thread.
    Reset,
    /// Show the conversation so far.
    History,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/reset" | "/new" => Some(ChatCommand::Reset),
        "/history" => Some(ChatCommand::History),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}    Show this help message", style("/help").cyan());
    println!("  {}   Start over with a fresh conversation", style("/reset").cyan());
    println!("  {} Show the conversation so far", style("/history").cyan());
    println!("  {}   Clear the screen", style("/clear").cyan());
    println!("  {}    End the chat session", style("/exit").cyan());
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_reset_and_history() {
        assert_eq!(parse("/reset"), Some(ChatCommand::Reset));
        assert_eq!(parse("/new"), Some(ChatCommand::Reset));
        assert_eq!(parse("  /HISTORY  "), Some(ChatCommand::History));
    }

    #[test]
    fn test_parse_clear() {
        assert_eq!(parse("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse("/cls"), Some(ChatCommand::Clear));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
        assert_eq!(parse("what about 1/2 of voters?"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo bar"), Some(ChatCommand::Unknown("/foo".to_string())));
    }
}
