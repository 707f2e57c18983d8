//! Command-line interface definition for ragchat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat command and one-shot commands for the
//! auxiliary backend endpoints.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ragchat - Terminal chat client for a conversational RAG backend
///
/// Chat with the backend interactively, manage conversation history,
/// and feed documents into the retrieval index.
#[derive(Parser, Debug, Clone)]
#[command(name = "ragchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the backend base URL
    #[arg(long, env = "RAGCHAT_API_URL")]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for ragchat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Resume an existing session by id (fetches its history first)
        #[arg(short, long)]
        session: Option<String>,

        /// Start with document retrieval disabled
        #[arg(long)]
        no_rag: bool,
    },

    /// Show the stored history for a session
    History {
        /// Session identifier
        session_id: String,

        /// Print raw JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Clear the stored history for a session
    Clear {
        /// Session identifier
        session_id: String,
    },

    /// Upload documents to the retrieval index
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show retrieval index statistics
    Stats {
        /// Print raw JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Search the retrieval index
    Search {
        /// Query text
        query: String,

        /// Number of results to return
        #[arg(short, long, default_value_t = 5)]
        k: usize,

        /// Print raw JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Check backend liveness
    Health,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
