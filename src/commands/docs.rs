//! Document and retrieval index command handlers
//!
//! One-shot commands against the RAG side of the backend: uploading
//! documents, index statistics, and similarity search.

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;

use colored::Colorize;
use std::path::PathBuf;

/// Upload documents to the retrieval index
pub async fn upload(config: &Config, files: &[PathBuf]) -> Result<()> {
    let client = ApiClient::new(&config.api)?;

    for file in files {
        if !file.exists() {
            anyhow::bail!("File not found: {}", file.display());
        }
    }

    println!("Uploading {} file(s)...", files.len());
    let response = client.upload_documents(files).await?;
    println!("{} {}", "OK:".green(), response.message);
    Ok(())
}

/// Print retrieval index statistics
pub async fn stats(config: &Config, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let stats = client.rag_stats().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    match stats.as_object() {
        Some(map) => {
            for (key, value) in map {
                println!("{}: {}", key.bold(), value);
            }
        }
        None => println!("{}", stats),
    }

    Ok(())
}

/// Search the retrieval index for documents similar to a query
pub async fn search(config: &Config, query: &str, k: usize, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let response = client.search_documents(query, k).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "{} result(s) for {}",
        response.count,
        format!("'{}'", response.query).bold()
    );
    for (idx, result) in response.results.iter().enumerate() {
        println!("{}. {}", idx + 1, result);
    }

    Ok(())
}
