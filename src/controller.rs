//! Conversation state controller
//!
//! Owns the ordered message list and the current session id, and
//! orchestrates send/clear/new-session operations as a small state
//! machine with two states: `Idle` and `Sending`.
//!
//! Sending is split into an explicit begin/complete pair so the
//! session-id guard runs at resolution time instead of relying on
//! closures capturing stale state. `begin_send` appends the user message
//! and hands back a [`PendingSend`] token; `complete_send` applies the
//! network result, discarding it when the session changed while the
//! request was in flight.
//!
//! The model is single-threaded and event-driven: the one suspension
//! point is the awaited HTTP round trip, and the `Sending` state rejects
//! a second send, so no locking is needed.

use crate::api::{ChatApi, ChatMessage, ChatRequest, ChatResponse};
use crate::error::Result;
use crate::session::SessionId;

/// State of the conversation controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No send in flight; input is accepted
    Idle,
    /// A send is awaiting the server; further sends are rejected
    Sending,
}

/// Token for a send that has been issued but not yet resolved
///
/// Captures the session id current at issue time so the completion can
/// be checked against the session current at resolution time.
#[derive(Debug, Clone)]
pub struct PendingSend {
    session_id: SessionId,
    request: ChatRequest,
}

impl PendingSend {
    /// The request to put on the wire
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Session id at the time the send was issued
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }
}

/// Result of resolving a send
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// The server answered; one assistant message was appended
    Replied {
        /// The appended assistant message
        message: ChatMessage,
        /// Documents that informed the response, when RAG was used
        sources: Option<Vec<String>>,
        /// Server-side processing time in seconds
        processing_time: Option<f64>,
    },
    /// The send failed; nothing was appended and the user may retry
    Failed(String),
    /// The session changed while the send was in flight; result ignored
    Discarded,
}

/// Conversation state controller
///
/// Explicit state object with no hidden globals, so tests are
/// deterministic. Lives for the lifetime of the view driving it; there
/// is no terminal state.
///
/// Invariants:
/// - the message list is append-only within a session,
/// - `new_session` replaces the list and the id atomically (old messages
///   never pair with a new id),
/// - the session id is never empty once the controller exists.
///
/// # Examples
///
/// ```
/// use ragchat::controller::{ChatController, ControllerState};
///
/// let controller = ChatController::new(true);
/// assert_eq!(controller.state(), ControllerState::Idle);
/// assert!(controller.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ChatController {
    session_id: SessionId,
    messages: Vec<ChatMessage>,
    state: ControllerState,
    use_rag: bool,
}

impl ChatController {
    /// Create an idle controller with a fresh session and empty list
    pub fn new(use_rag: bool) -> Self {
        Self {
            session_id: SessionId::generate(),
            messages: Vec::new(),
            state: ControllerState::Idle,
            use_rag,
        }
    }

    /// Create a controller resuming an existing server-side session
    ///
    /// # Arguments
    ///
    /// * `session_id` - The session to continue
    /// * `messages` - Previously stored history, as fetched from the server
    /// * `use_rag` - Whether sends should request document retrieval
    pub fn resume(session_id: SessionId, messages: Vec<ChatMessage>, use_rag: bool) -> Self {
        Self {
            session_id,
            messages,
            state: ControllerState::Idle,
            use_rag,
        }
    }

    /// Current controller state
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Current session id
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// All messages of the current session, in insertion order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True if the current session has no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether sends request document retrieval
    pub fn use_rag(&self) -> bool {
        self.use_rag
    }

    /// Toggle document retrieval for subsequent sends
    pub fn set_use_rag(&mut self, use_rag: bool) {
        self.use_rag = use_rag;
    }

    /// Begin sending a message
    ///
    /// Appends exactly one user message (timestamp = now, session id =
    /// current) and transitions to `Sending`. Returns `None` without any
    /// transition when the trimmed content is empty or a send is already
    /// in flight; the caller's submit action is simply inert.
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::controller::{ChatController, ControllerState};
    ///
    /// let mut controller = ChatController::new(true);
    /// assert!(controller.begin_send("   ").is_none());
    ///
    /// let pending = controller.begin_send("Hello").unwrap();
    /// assert_eq!(controller.state(), ControllerState::Sending);
    /// assert_eq!(pending.request().message, "Hello");
    /// ```
    pub fn begin_send(&mut self, content: &str) -> Option<PendingSend> {
        if self.state == ControllerState::Sending {
            tracing::debug!("Send rejected: another send is in flight");
            return None;
        }

        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        self.messages
            .push(ChatMessage::user(content, Some(self.session_id.clone())));
        self.state = ControllerState::Sending;

        Some(PendingSend {
            session_id: self.session_id.clone(),
            request: ChatRequest::new(content, self.session_id.clone(), self.use_rag),
        })
    }

    /// Resolve a send with the network result
    ///
    /// The session-id guard runs first: when the pending send's session
    /// differs from the current one, the result is discarded and no state
    /// is touched (a `new_session` while in flight logically cancels the
    /// send). Otherwise a success appends one assistant message built
    /// from the response and adopts the response's session id, which may
    /// be server-assigned; a failure appends nothing and the previously
    /// appended user message stays (failed sends are not rolled back).
    /// Both paths return to `Idle`.
    pub fn complete_send(
        &mut self,
        pending: &PendingSend,
        result: Result<ChatResponse>,
    ) -> SendOutcome {
        if pending.session_id != self.session_id {
            tracing::debug!(
                "Discarding response for stale session {} (current {})",
                pending.session_id,
                self.session_id
            );
            return SendOutcome::Discarded;
        }

        self.state = ControllerState::Idle;

        match result {
            Ok(response) => {
                let message = ChatMessage::assistant_from_response(&response);
                self.session_id = response.session_id.clone();
                self.messages.push(message.clone());
                SendOutcome::Replied {
                    message,
                    sources: response.sources,
                    processing_time: response.processing_time,
                }
            }
            Err(e) => {
                tracing::warn!("Send failed: {}", e);
                SendOutcome::Failed(e.to_string())
            }
        }
    }

    /// Send a message through the given API client
    ///
    /// Convenience wrapper composing `begin_send`, the network call, and
    /// `complete_send`. Returns `None` when the input was rejected before
    /// any network call (empty content or send already in flight).
    pub async fn send(&mut self, api: &dyn ChatApi, content: &str) -> Option<SendOutcome> {
        let pending = self.begin_send(content)?;
        let result = api.send_message(pending.request.clone()).await;
        Some(self.complete_send(&pending, result))
    }

    /// Start a new session
    ///
    /// Clears the message list and replaces the session id atomically,
    /// returning to `Idle`. Allowed from either state; an in-flight send
    /// from the old session is logically cancelled (its eventual result
    /// fails the session-id guard in `complete_send`).
    pub fn new_session(&mut self) -> SessionId {
        self.messages.clear();
        self.session_id = SessionId::generate();
        self.state = ControllerState::Idle;
        tracing::info!("Started new session: {}", self.session_id);
        self.session_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;
    use crate::error::RagchatError;
    use crate::test_utils::{response_with_session, FakeChatApi};
    use chrono::Utc;

    fn make_response(message: &str, session_id: &str) -> ChatResponse {
        ChatResponse {
            message: message.to_string(),
            session_id: SessionId::from(session_id),
            timestamp: Utc::now(),
            sources: None,
            processing_time: None,
        }
    }

    #[test]
    fn test_initial_state() {
        let controller = ChatController::new(true);
        assert_eq!(controller.state(), ControllerState::Idle);
        assert!(controller.is_empty());
        assert!(!controller.session_id().as_str().is_empty());
    }

    #[test]
    fn test_begin_send_appends_one_user_message() {
        let mut controller = ChatController::new(true);
        let pending = controller.begin_send("Hello").unwrap();

        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.messages()[0].role, Role::User);
        assert_eq!(controller.messages()[0].content, "Hello");
        assert_eq!(
            controller.messages()[0].session_id.as_ref(),
            Some(controller.session_id())
        );
        assert_eq!(controller.state(), ControllerState::Sending);
        assert_eq!(pending.request().message, "Hello");
        assert_eq!(pending.session_id(), controller.session_id());
    }

    #[test]
    fn test_begin_send_trims_content() {
        let mut controller = ChatController::new(true);
        let pending = controller.begin_send("  Hello  ").unwrap();
        assert_eq!(controller.messages()[0].content, "Hello");
        assert_eq!(pending.request().message, "Hello");
    }

    #[test]
    fn test_begin_send_rejects_empty_content() {
        let mut controller = ChatController::new(true);
        assert!(controller.begin_send("").is_none());
        assert!(controller.begin_send("   \t\n").is_none());
        assert!(controller.is_empty());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_second_send_while_sending_is_noop() {
        let mut controller = ChatController::new(true);
        controller.begin_send("first").unwrap();

        assert!(controller.begin_send("second").is_none());
        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.state(), ControllerState::Sending);
    }

    #[test]
    fn test_success_appends_assistant_and_returns_to_idle() {
        let mut controller = ChatController::new(true);
        let pending = controller.begin_send("Hello").unwrap();

        let response = make_response("Hi there", "abc");
        let outcome = controller.complete_send(&pending, Ok(response));

        assert!(matches!(outcome, SendOutcome::Replied { .. }));
        assert_eq!(controller.messages().len(), 2);
        assert_eq!(controller.messages()[0].role, Role::User);
        assert_eq!(controller.messages()[0].content, "Hello");
        assert_eq!(controller.messages()[1].role, Role::Assistant);
        assert_eq!(controller.messages()[1].content, "Hi there");
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_success_adopts_response_session_id() {
        let mut controller = ChatController::new(true);
        let pending = controller.begin_send("Hello").unwrap();

        let outcome = controller.complete_send(&pending, Ok(make_response("Hi there", "abc")));

        assert!(matches!(outcome, SendOutcome::Replied { .. }));
        assert_eq!(controller.session_id(), &SessionId::from("abc"));
        assert_eq!(
            controller.messages()[1].session_id,
            Some(SessionId::from("abc"))
        );
    }

    #[test]
    fn test_failure_keeps_user_message_and_returns_to_idle() {
        let mut controller = ChatController::new(true);
        let pending = controller.begin_send("Hello").unwrap();

        let err = RagchatError::Network("connection refused".to_string());
        let outcome = controller.complete_send(&pending, Err(err.into()));

        match outcome {
            SendOutcome::Failed(msg) => assert!(msg.contains("connection refused")),
            other => panic!("Expected Failed outcome, got {:?}", other),
        }
        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.messages()[0].content, "Hello");
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_new_session_clears_list_and_changes_id() {
        let mut controller = ChatController::new(true);
        let pending = controller.begin_send("Hello").unwrap();
        controller.complete_send(&pending, Ok(make_response("Hi", "abc")));
        assert_eq!(controller.messages().len(), 2);

        let old_id = controller.session_id().clone();
        let new_id = controller.new_session();

        assert!(controller.is_empty());
        assert_ne!(new_id, old_id);
        assert_eq!(controller.session_id(), &new_id);
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_stale_response_is_discarded_after_new_session() {
        let mut controller = ChatController::new(true);
        let pending = controller.begin_send("A").unwrap();

        controller.new_session();

        let outcome = controller.complete_send(&pending, Ok(make_response("late", "old")));

        assert!(matches!(outcome, SendOutcome::Discarded));
        assert!(controller.is_empty());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_stale_failure_is_also_discarded() {
        let mut controller = ChatController::new(true);
        let pending = controller.begin_send("A").unwrap();

        controller.new_session();

        let err = RagchatError::Network("timeout".to_string());
        let outcome = controller.complete_send(&pending, Err(err.into()));
        assert!(matches!(outcome, SendOutcome::Discarded));
    }

    #[test]
    fn test_new_session_while_sending_allows_next_send() {
        let mut controller = ChatController::new(true);
        controller.begin_send("A").unwrap();
        assert_eq!(controller.state(), ControllerState::Sending);

        controller.new_session();

        // The new session accepts input again.
        assert!(controller.begin_send("B").is_some());
        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.messages()[0].content, "B");
    }

    #[test]
    fn test_resume_keeps_history_and_session() {
        let messages = vec![
            ChatMessage::user("Hello", Some(SessionId::from("abc"))),
            ChatMessage::system("context"),
        ];
        let controller = ChatController::resume(SessionId::from("abc"), messages, false);

        assert_eq!(controller.session_id(), &SessionId::from("abc"));
        assert_eq!(controller.messages().len(), 2);
        assert!(!controller.use_rag());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_set_use_rag_applies_to_requests() {
        let mut controller = ChatController::new(true);
        controller.set_use_rag(false);

        let pending = controller.begin_send("Hello").unwrap();
        assert!(!pending.request().use_rag);
    }

    #[test]
    fn test_send_scenario_hello_success() {
        // send "Hello" -> mock success {message:"Hi there", session_id:"abc"}
        // -> list == [user:"Hello", assistant:"Hi there"], session == "abc"
        let api = FakeChatApi::new().with_response(response_with_session("Hi there", "abc"));
        let mut controller = ChatController::new(true);

        let outcome = tokio_test::block_on(controller.send(&api, "Hello")).unwrap();

        assert!(matches!(outcome, SendOutcome::Replied { .. }));
        assert_eq!(controller.messages().len(), 2);
        assert_eq!(controller.messages()[0].content, "Hello");
        assert_eq!(controller.messages()[1].content, "Hi there");
        assert_eq!(controller.session_id(), &SessionId::from("abc"));
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_send_scenario_network_failure() {
        // send "Hello" -> mock network failure -> list == [user:"Hello"],
        // Failed outcome, state == Idle
        let api = FakeChatApi::new().with_failure("connection refused");
        let mut controller = ChatController::new(true);

        let outcome = tokio_test::block_on(controller.send(&api, "Hello")).unwrap();

        assert!(matches!(outcome, SendOutcome::Failed(_)));
        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.messages()[0].content, "Hello");
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_send_rejects_empty_before_network() {
        let api = FakeChatApi::new();
        let mut controller = ChatController::new(true);

        let outcome = tokio_test::block_on(controller.send(&api, "  "));

        assert!(outcome.is_none());
        assert_eq!(api.send_count(), 0);
    }

    #[test]
    fn test_replied_outcome_carries_sources_and_timing() {
        let mut controller = ChatController::new(true);
        let pending = controller.begin_send("Hello").unwrap();

        let mut response = make_response("Hi", "abc");
        response.sources = Some(vec!["doc1.pdf".to_string()]);
        response.processing_time = Some(1.5);

        match controller.complete_send(&pending, Ok(response)) {
            SendOutcome::Replied {
                sources,
                processing_time,
                ..
            } => {
                assert_eq!(sources, Some(vec!["doc1.pdf".to_string()]));
                assert_eq!(processing_time, Some(1.5));
            }
            other => panic!("Expected Replied outcome, got {:?}", other),
        }
    }
}
