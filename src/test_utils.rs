//! Test utilities for ragchat
//!
//! Provides a scripted in-process `ChatApi` double so controller behavior
//! can be exercised deterministically, without a network or mock server.

use crate::api::{ChatApi, ChatMessage, ChatRequest, ChatResponse};
use crate::error::{RagchatError, Result};
use crate::session::SessionId;

use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Build a `ChatResponse` with the given message and session id
pub fn response_with_session(message: &str, session_id: &str) -> ChatResponse {
    ChatResponse {
        message: message.to_string(),
        session_id: SessionId::from(session_id),
        timestamp: Utc::now(),
        sources: None,
        processing_time: None,
    }
}

enum ScriptedReply {
    Respond(ChatResponse),
    Fail(String),
}

/// Scripted `ChatApi` double
///
/// Replies to `send_message` from a queue of scripted results, in order.
/// When the queue is exhausted it fails, which catches tests that send
/// more than they scripted.
///
/// # Examples
///
/// ```
/// use ragchat::test_utils::{response_with_session, FakeChatApi};
///
/// let api = FakeChatApi::new()
///     .with_response(response_with_session("Hi there", "abc"))
///     .with_failure("connection refused");
/// ```
pub struct FakeChatApi {
    replies: Mutex<VecDeque<ScriptedReply>>,
    history: Mutex<Vec<ChatMessage>>,
    sends: AtomicUsize,
}

impl FakeChatApi {
    /// Create a double with an empty script
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            history: Mutex::new(Vec::new()),
            sends: AtomicUsize::new(0),
        }
    }

    /// Queue a successful response
    pub fn with_response(self, response: ChatResponse) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Respond(response));
        self
    }

    /// Queue a transport failure
    pub fn with_failure(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Fail(message.to_string()));
        self
    }

    /// Set the history returned by `get_history`
    pub fn with_history(self, messages: Vec<ChatMessage>) -> Self {
        *self.history.lock().unwrap() = messages;
        self
    }

    /// Number of `send_message` calls observed
    pub fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

impl Default for FakeChatApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatApi for FakeChatApi {
    async fn send_message(&self, _request: ChatRequest) -> Result<ChatResponse> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        match self.replies.lock().unwrap().pop_front() {
            Some(ScriptedReply::Respond(response)) => Ok(response),
            Some(ScriptedReply::Fail(message)) => Err(RagchatError::Network(message).into()),
            None => Err(RagchatError::Network("no scripted reply".to_string()).into()),
        }
    }

    async fn get_history(&self, _session_id: &SessionId) -> Result<Vec<ChatMessage>> {
        Ok(self.history.lock().unwrap().clone())
    }

    async fn clear_history(&self, _session_id: &SessionId) -> Result<()> {
        self.history.lock().unwrap().clear();
        Ok(())
    }
}
