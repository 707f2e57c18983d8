//! Wire types for the chat/RAG backend
//!
//! These structures mirror the backend's JSON contract. Field names are
//! fixed by the server; do not rename them without a matching backend
//! change.

use crate::session::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message typed by the user
    User,
    /// A response generated by the backend
    Assistant,
    /// Server-side instruction or context
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::System => write!(f, "system"),
        }
    }
}

/// One turn in a conversation
///
/// Immutable once created; ordering in a conversation is insertion order
/// and messages carry no identity beyond their position.
///
/// # Examples
///
/// ```
/// use ragchat::api::{ChatMessage, Role};
/// use ragchat::session::SessionId;
///
/// let msg = ChatMessage::user("Hello!", Some(SessionId::from("abc")));
/// assert_eq!(msg.role, Role::User);
/// assert_eq!(msg.content, "Hello!");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message
    pub role: Role,
    /// Message text
    pub content: String,
    /// Creation time (assigned by whoever created the message)
    pub timestamp: DateTime<Utc>,
    /// Session the message belongs to, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

impl ChatMessage {
    /// Creates a user message timestamped now
    pub fn user(content: impl Into<String>, session_id: Option<SessionId>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            session_id,
        }
    }

    /// Creates an assistant message from a server response
    ///
    /// Content, timestamp, and session id are taken from the response;
    /// the client does not re-stamp them.
    pub fn assistant_from_response(response: &ChatResponse) -> Self {
        Self {
            role: Role::Assistant,
            content: response.message.clone(),
            timestamp: response.timestamp,
            session_id: Some(response.session_id.clone()),
        }
    }

    /// Creates a system message timestamped now
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            timestamp: Utc::now(),
            session_id: None,
        }
    }
}

/// Request body for `POST /chat/message`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user message to answer
    pub message: String,
    /// Session to continue; the server creates one when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    /// Whether the server should retrieve document context
    #[serde(default = "default_use_rag")]
    pub use_rag: bool,
    /// Optional caller-supplied context snippets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<String>>,
}

fn default_use_rag() -> bool {
    true
}

impl ChatRequest {
    /// Build a request for a message within a session
    pub fn new(message: impl Into<String>, session_id: SessionId, use_rag: bool) -> Self {
        Self {
            message: message.into(),
            session_id: Some(session_id),
            use_rag,
            context: None,
        }
    }
}

/// Response body from `POST /chat/message`
///
/// The `session_id` is authoritative: the server may issue a new one, and
/// the client must adopt it for subsequent requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated assistant message
    pub message: String,
    /// Session the response belongs to (possibly server-assigned)
    pub session_id: SessionId,
    /// Server-side creation time of the response
    pub timestamp: DateTime<Utc>,
    /// Documents that informed the response, when RAG was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    /// Server-side processing time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

/// Server-owned session metadata
///
/// Returned by session-listing endpoints; the client never constructs
/// these locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Opaque session token
    pub session_id: SessionId,
    /// Owning user, when authentication is in play
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Last time a message was exchanged
    pub last_activity: DateTime<Utc>,
    /// Number of messages stored for the session
    #[serde(default)]
    pub message_count: usize,
}

/// Response body from `POST /rag/documents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Human-readable acknowledgement from the server
    pub message: String,
}

/// Response body from `POST /rag/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query that was searched
    pub query: String,
    /// Matching document snippets, shape defined by the server
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    /// Number of results returned
    #[serde(default)]
    pub count: usize,
}

/// Response body from `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Liveness indicator, "healthy" when the API is up
    pub status: String,
    /// Optional human-readable detail
    #[serde(default)]
    pub message: String,
}
