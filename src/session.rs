//! Session identifier generation
//!
//! A session scopes a sequence of messages on the server. The client only
//! ever holds the opaque identifier; all other session metadata is
//! server-owned.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque session identifier
///
/// Wraps the token that scopes a conversation on the backend. Fresh
/// identifiers are UUIDv4-backed, which makes collisions negligible for
/// the lifetime of a session. The server may issue its own identifier in
/// a response, in which case the client adopts it verbatim.
///
/// # Examples
///
/// ```
/// use ragchat::session::SessionId;
///
/// let a = SessionId::generate();
/// let b = SessionId::generate();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh session identifier
    ///
    /// Practically unique across invocations within the process. No
    /// inputs, no failure mode, and no shared state is mutated.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix of the identifier, suitable for prompt tags
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::session::SessionId;
    ///
    /// let id = SessionId::from("abcdef01-2345-6789-abcd-ef0123456789");
    /// assert_eq!(id.short(), "abcdef01");
    /// ```
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
