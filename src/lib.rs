//! ragchat - Terminal chat client library
//!
//! This library provides the core functionality for the ragchat client:
//! session management, the typed API client, and the conversation state
//! controller driving the interactive session.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Opaque session identifier generation
//! - `api`: Wire types, the `ChatApi` trait, and the HTTP client
//! - `controller`: Conversation state machine (idle/sending, send guard)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Handlers for the CLI subcommands
//!
//! # Example
//!
//! ```no_run
//! use ragchat::{ApiClient, ChatController, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let client = ApiClient::new(&config.api)?;
//!     let mut controller = ChatController::new(config.chat.use_rag);
//!     if let Some(outcome) = controller.send(&client, "Hello!").await {
//!         println!("{:?}", outcome);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use api::{ApiClient, ChatApi, ChatMessage, ChatRequest, ChatResponse, Role};
pub use config::Config;
pub use controller::{ChatController, ControllerState, SendOutcome};
pub use error::{RagchatError, Result};
pub use session::SessionId;

#[cfg(test)]
pub mod test_utils;
