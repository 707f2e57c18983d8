//! Error types for ragchat
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for ragchat operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, API calls, and response handling. The three
/// API-facing variants mirror the failure taxonomy of the backend
/// contract: transport failures, non-success statuses, and bodies that
/// cannot be parsed.
#[derive(Error, Debug)]
pub enum RagchatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failures where no response reached the client
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success HTTP status
    #[error("Server error: status={status}, {message}")]
    Server {
        /// HTTP status code returned by the server
        status: u16,
        /// Response body or status text, for diagnostics
        message: String,
    },

    /// The response body could not be parsed into the expected type
    #[error("Decode error: {0}")]
    Decode(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RagchatError {
    /// Classify a `reqwest` error as a transport failure
    ///
    /// Everything that prevented a response from reaching the client
    /// (connection refused, DNS failure, timeout) maps to `Network`.
    pub fn transport(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for ragchat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = RagchatError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_network_error_display() {
        let error = RagchatError::Network("connection refused".to_string());
        assert_eq!(error.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_server_error_display() {
        let error = RagchatError::Server {
            status: 500,
            message: "Failed to process message".to_string(),
        };
        let s = error.to_string();
        assert!(s.contains("status=500"));
        assert!(s.contains("Failed to process message"));
    }

    #[test]
    fn test_decode_error_display() {
        let error = RagchatError::Decode("missing field `message`".to_string());
        assert_eq!(error.to_string(), "Decode error: missing field `message`");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: RagchatError = io_error.into();
        assert!(matches!(error, RagchatError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: RagchatError = json_error.into();
        assert!(matches!(error, RagchatError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: RagchatError = yaml_error.into();
        assert!(matches!(error, RagchatError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RagchatError>();
    }
}
