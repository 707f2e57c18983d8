//! API client for the chat/RAG backend
//!
//! This module defines the wire types of the backend contract, the
//! `ChatApi` trait covering the conversation-facing endpoints, and the
//! concrete `reqwest`-backed client. The trait exists so the conversation
//! controller can be exercised against a scripted double in tests.

mod client;
mod types;

pub use client::ApiClient;
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, HealthStatus, Role, SearchResponse, SessionInfo,
    UploadResponse,
};

use crate::error::Result;
use crate::session::SessionId;
use async_trait::async_trait;

/// Conversation-facing operations of the backend
///
/// The controller depends on this trait rather than on the concrete
/// client. Auxiliary RAG/document endpoints live directly on
/// [`ApiClient`] since nothing else needs to stub them.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send a message and get the generated response
    ///
    /// The response's `session_id` is authoritative and may differ from
    /// the request's when the server issues a new one.
    async fn send_message(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Fetch the stored history for a session
    async fn get_history(&self, session_id: &SessionId) -> Result<Vec<ChatMessage>>;

    /// Clear the stored history for a session
    ///
    /// Idempotent from the caller's perspective: clearing an unknown or
    /// already-empty session succeeds.
    async fn clear_history(&self, session_id: &SessionId) -> Result<()>;
}
