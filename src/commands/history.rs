//! History command handlers
//!
//! One-shot access to server-side conversation history: show and clear.

use crate::api::{ApiClient, ChatApi};
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionId;

use colored::Colorize;

/// Fetch and print the stored history for a session
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `session_id` - The session to show
/// * `json` - Print raw JSON instead of formatted lines
pub async fn show_history(config: &Config, session_id: &str, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let session_id = SessionId::from(session_id);
    let history = client.get_history(&session_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No stored history for session {}", session_id);
        return Ok(());
    }

    println!("History for session {} ({} messages):", session_id, history.len());
    for message in &history {
        println!(
            "{} [{}] {}",
            message.timestamp.format("%Y-%m-%d %H:%M:%S"),
            message.role.to_string().bold(),
            message.content
        );
    }

    Ok(())
}

/// Clear the stored history for a session
pub async fn clear_history(config: &Config, session_id: &str) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let session_id = SessionId::from(session_id);
    client.clear_history(&session_id).await?;
    println!("Cleared history for session {}", session_id);
    Ok(())
}
