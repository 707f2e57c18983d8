//! Special commands parser for interactive chat mode
//!
//! This module parses and handles special commands that can be entered
//! during interactive chat sessions. Special commands allow users to:
//! - Start a new session
//! - Clear the server-side history
//! - Fetch and display the server-side history
//! - Toggle document retrieval
//! - Display help information
//! - Exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands modify the session state or provide information,
/// rather than being sent to the backend as messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start a new session (clears the local list, fresh session id)
    NewSession,

    /// Clear the server-side history for the current session, then start
    /// a new one
    ClearHistory,

    /// Fetch and display the server-side history for the current session
    ShowHistory,

    /// Display the current session id
    ShowSession,

    /// Enable or disable document retrieval for subsequent messages
    SetRag(bool),

    /// Display help information
    Help,

    /// Exit the session
    Quit,
}

/// Parse a special command from user input
///
/// Returns `None` when the input is not a special command (does not
/// start with `/`), so it should be sent to the backend as a message.
///
/// # Examples
///
/// ```
/// use ragchat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("hello"), None);
/// assert_eq!(
///     parse_special_command("/new"),
///     Some(Ok(SpecialCommand::NewSession))
/// );
/// ```
pub fn parse_special_command(input: &str) -> Option<Result<SpecialCommand, CommandError>> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next();

    let parsed = match command.as_str() {
        "/new" => Ok(SpecialCommand::NewSession),
        "/clear" => Ok(SpecialCommand::ClearHistory),
        "/history" => Ok(SpecialCommand::ShowHistory),
        "/session" => Ok(SpecialCommand::ShowSession),
        "/rag" => match arg.map(str::to_lowercase).as_deref() {
            Some("on") => Ok(SpecialCommand::SetRag(true)),
            Some("off") => Ok(SpecialCommand::SetRag(false)),
            Some(other) => Err(CommandError::UnsupportedArgument {
                command: "/rag".to_string(),
                arg: other.to_string(),
            }),
            None => Err(CommandError::MissingArgument {
                command: "/rag".to_string(),
                usage: "/rag on|off".to_string(),
            }),
        },
        "/help" => Ok(SpecialCommand::Help),
        "/quit" | "/exit" => Ok(SpecialCommand::Quit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    };

    Some(parsed)
}

/// Print help for the interactive chat session
pub fn print_help() {
    println!("Available commands:");
    println!("  /new         Start a new session");
    println!("  /clear       Clear the server-side history and start a new session");
    println!("  /history     Show the server-side history for this session");
    println!("  /session     Show the current session id");
    println!("  /rag on|off  Toggle document retrieval");
    println!("  /help        Show this help");
    println!("  /quit        Exit (also /exit, Ctrl-C, Ctrl-D)");
    println!();
    println!("Anything else is sent to the assistant.");
}
