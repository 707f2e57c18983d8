//! HTTP client for the chat/RAG backend
//!
//! Thin typed wrapper over `reqwest`. Failures are classified into the
//! three kinds the rest of the application cares about: `Network` when no
//! response arrived, `Server` on a non-success status, and `Decode` when
//! a body cannot be parsed. No retries and no timeout policy beyond the
//! configured transport default; failures surface immediately.

use crate::api::types::{
    ChatMessage, ChatRequest, ChatResponse, HealthStatus, SearchResponse, UploadResponse,
};
use crate::api::ChatApi;
use crate::config::ApiConfig;
use crate::error::{RagchatError, Result};
use crate::session::SessionId;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;

/// Typed client for the chat backend
///
/// Holds a connection-pooled `reqwest::Client` and the configured base
/// URL. Cheap to clone.
///
/// # Examples
///
/// ```no_run
/// use ragchat::config::ApiConfig;
/// use ragchat::api::{ApiClient, ChatApi, ChatRequest};
/// use ragchat::session::SessionId;
///
/// # async fn example() -> ragchat::error::Result<()> {
/// let client = ApiClient::new(&ApiConfig::default())?;
/// let request = ChatRequest::new("Hello!", SessionId::generate(), true);
/// let response = client.send_message(request).await?;
/// println!("{}", response.message);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("ragchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RagchatError::Network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized API client: base_url={}", config.base_url);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reject non-success statuses, capturing the body for diagnostics
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!("Server returned error {}: {}", status, message);
            return Err(RagchatError::Server {
                status: status.as_u16(),
                message,
            }
            .into());
        }
        Ok(response)
    }

    /// Parse a successful response body into the expected type
    ///
    /// Reads the body as text first so a malformed payload is reported as
    /// a decode failure rather than a transport one.
    async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|e| RagchatError::Network(format!("Failed to read response body: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse response body: {}", e);
            RagchatError::Decode(format!("{}: {}", e, truncate(&body, 200))).into()
        })
    }

    /// Upload documents to the RAG index
    ///
    /// Sends a multipart form with one `files` part per path.
    ///
    /// # Errors
    ///
    /// Returns error if a file cannot be read or the upload fails
    pub async fn upload_documents(&self, paths: &[impl AsRef<Path>]) -> Result<UploadResponse> {
        let mut form = multipart::Form::new();
        for path in paths {
            let path = path.as_ref();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "document".to_string());
            let data = tokio::fs::read(path).await?;
            form = form.part("files", multipart::Part::bytes(data).file_name(name));
        }

        tracing::debug!("Uploading {} documents", paths.len());

        let response = self
            .client
            .post(self.endpoint("/rag/documents"))
            .multipart(form)
            .send()
            .await
            .map_err(RagchatError::transport)?;

        let response = Self::check_status(response).await?;
        Self::decode_body(response).await
    }

    /// Fetch RAG index statistics
    ///
    /// The stats shape is server-defined, so this returns raw JSON.
    pub async fn rag_stats(&self) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(self.endpoint("/rag/stats"))
            .send()
            .await
            .map_err(RagchatError::transport)?;

        let response = Self::check_status(response).await?;
        Self::decode_body(response).await
    }

    /// Search the RAG index for documents similar to a query
    ///
    /// The backend reads `query` and `k` as query parameters.
    pub async fn search_documents(&self, query: &str, k: usize) -> Result<SearchResponse> {
        tracing::debug!("Searching documents: query={}, k={}", query, k);

        let response = self
            .client
            .post(self.endpoint("/rag/search"))
            .query(&[("query", query), ("k", &k.to_string())])
            .send()
            .await
            .map_err(RagchatError::transport)?;

        let response = Self::check_status(response).await?;
        Self::decode_body(response).await
    }

    /// Probe backend liveness
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .client
            .get(self.endpoint("/health"))
            .send()
            .await
            .map_err(RagchatError::transport)?;

        let response = Self::check_status(response).await?;
        Self::decode_body(response).await
    }
}

#[async_trait]
impl ChatApi for ApiClient {
    async fn send_message(&self, request: ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(
            "Sending message: session={:?}, use_rag={}",
            request.session_id,
            request.use_rag
        );

        let response = self
            .client
            .post(self.endpoint("/chat/message"))
            .json(&request)
            .send()
            .await
            .map_err(RagchatError::transport)?;

        let response = Self::check_status(response).await?;
        Self::decode_body(response).await
    }

    async fn get_history(&self, session_id: &SessionId) -> Result<Vec<ChatMessage>> {
        let response = self
            .client
            .get(self.endpoint(&format!("/chat/history/{}", session_id)))
            .send()
            .await
            .map_err(RagchatError::transport)?;

        let response = Self::check_status(response).await?;
        Self::decode_body(response).await
    }

    async fn clear_history(&self, session_id: &SessionId) -> Result<()> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/chat/history/{}", session_id)))
            .send()
            .await
            .map_err(RagchatError::transport)?;

        // Clearing an unknown or already-empty session is not an error the
        // caller must distinguish; the backend 404s, the client absorbs it.
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Session {} unknown to server, treating as cleared", session_id);
            return Ok(());
        }

        Self::check_status(response).await?;
        Ok(())
    }
}

/// Truncate a string for inclusion in error messages
fn truncate(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
