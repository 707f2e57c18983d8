//! ragchat - Terminal chat client
//!
//! Main entry point for the ragchat application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ragchat::cli::{Cli, Commands};
use ragchat::commands;
use ragchat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { session, no_rag } => {
            tracing::info!("Starting interactive chat session");
            if let Some(s) = &session {
                tracing::debug!("Resuming session: {}", s);
            }
            commands::chat::run_chat(config, session, no_rag).await?;
            Ok(())
        }
        Commands::History { session_id, json } => {
            commands::history::show_history(&config, &session_id, json).await?;
            Ok(())
        }
        Commands::Clear { session_id } => {
            commands::history::clear_history(&config, &session_id).await?;
            Ok(())
        }
        Commands::Upload { files } => {
            tracing::info!("Uploading {} documents", files.len());
            commands::docs::upload(&config, &files).await?;
            Ok(())
        }
        Commands::Stats { json } => {
            commands::docs::stats(&config, json).await?;
            Ok(())
        }
        Commands::Search { query, k, json } => {
            commands::docs::search(&config, &query, k, json).await?;
            Ok(())
        }
        Commands::Health => {
            commands::health::check(&config).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "ragchat=debug" } else { "ragchat=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
