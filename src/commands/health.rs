//! Health check command handler

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;

use colored::Colorize;

/// Probe backend liveness and print the result
pub async fn check(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let health = client.health().await?;

    if health.status == "healthy" {
        println!("{} {}", "healthy".green().bold(), health.message);
    } else {
        println!("{} {}", health.status.red().bold(), health.message);
    }

    Ok(())
}
