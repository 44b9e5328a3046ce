//! Client-side conversation state
//!
//! A `ConversationManager` is created once per chat session. It owns the
//! history, the draft and the in-flight flag. All transitions go through
//! `&mut self`, one UI event at a time.
//!
//! A submission produces a [`PendingRequest`] tagged with a [`Ticket`]. The
//! caller dispatches it through a [`RelayClient`] and feeds the outcome back
//! through [`ConversationManager::complete`]. Outcomes whose ticket is not the
//! outstanding one, for example replies that arrive after [`reset`], are
//! dropped.
//!
//! [`reset`]: ConversationManager::reset

pub mod format;
pub mod relay_client;
pub mod render;
pub mod suggestions;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conversation::{recent_context, Message};

pub use format::{escape_html, Formatter, HtmlFormatter, TerminalFormatter};
pub use relay_client::{HttpRelayClient, RelayClient, RelayClientError};
pub use render::{render, Body, View, ViewEntry};

/// Shown in place of a reply whenever a round trip fails
pub const GENERIC_ERROR: &str =
    "Sorry, there was an error connecting to the server. Please try again.";

/// Prior turns sent along with each question
const DEFAULT_CONTEXT_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One entry of the conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    sender: Sender,
    content: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    failed: bool,
}

impl ChatMessage {
    fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
            timestamp: Utc::now(),
            failed: false,
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether this is the generic error shown after a failed round trip
    pub fn is_failure_notice(&self) -> bool {
        self.failed
    }

    fn to_turn(&self) -> Message {
        match self.sender {
            Sender::User => Message::user(self.content.clone()),
            Sender::Assistant => Message::assistant(self.content.clone()),
        }
    }
}

/// Identifies one outbound request within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub session: Uuid,
    pub seq: u64,
}

/// A question ready to be sent to the relay
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub message: String,
    /// Turns preceding `message`, oldest first
    pub history: Vec<Message>,
}

pub struct ConversationManager {
    session: Uuid,
    history: Vec<ChatMessage>,
    draft: String,
    in_flight: Option<Ticket>,
    next_seq: u64,
    context_window: usize,
}

impl ConversationManager {
    pub fn new() -> Self {
        Self {
            session: Uuid::new_v4(),
            history: Vec::new(),
            draft: String::new(),
            in_flight: None,
            next_seq: 0,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }

    /// Limit how many prior turns accompany each question
    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// True while a request is outstanding
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Replace the draft with a suggested question
    pub fn insert_suggestion(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Append a suggestion to the draft, separated by a space
    pub fn append_suggestion_fragment(&mut self, text: &str) {
        let fragment = text.trim();
        if fragment.is_empty() {
            return;
        }
        if !self.draft.is_empty() && !self.draft.ends_with(char::is_whitespace) {
            self.draft.push(' ');
        }
        self.draft.push_str(fragment);
    }

    /// Record a user question and prepare its request.
    ///
    /// Returns `None` without touching any state when the text is blank or
    /// another request is outstanding.
    pub fn submit(&mut self, text: &str) -> Option<PendingRequest> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }
        if self.in_flight.is_some() {
            tracing::debug!("Submit ignored: a request is already in flight");
            return None;
        }

        let prior: Vec<Message> = self
            .history
            .iter()
            .filter(|m| !m.failed)
            .map(ChatMessage::to_turn)
            .collect();
        let history = recent_context(&prior, self.context_window);

        self.history.push(ChatMessage::new(Sender::User, message));
        self.draft.clear();

        let ticket = Ticket {
            session: self.session,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.in_flight = Some(ticket);

        Some(PendingRequest {
            ticket,
            message: message.to_string(),
            history,
        })
    }

    /// Submit the current draft
    pub fn submit_draft(&mut self) -> Option<PendingRequest> {
        let draft = self.draft.clone();
        self.submit(&draft)
    }

    fn accept(&mut self, ticket: Ticket) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                stale_session = %ticket.session,
                seq = ticket.seq,
                "Discarding response for a request that is no longer outstanding"
            );
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Apply a successful reply. Returns false if the ticket was stale.
    pub fn on_relay_success(&mut self, ticket: Ticket, reply: impl Into<String>) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.history.push(ChatMessage::new(Sender::Assistant, reply));
        true
    }

    /// Apply a failed round trip. Returns false if the ticket was stale.
    pub fn on_relay_failure(&mut self, ticket: Ticket, error: &RelayClientError) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        tracing::warn!("Relay request failed: {}", error);
        let mut notice = ChatMessage::new(Sender::Assistant, GENERIC_ERROR);
        notice.failed = true;
        self.history.push(notice);
        true
    }

    /// Route a relay outcome to the success or failure transition
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<String, RelayClientError>) -> bool {
        match outcome {
            Ok(reply) => self.on_relay_success(ticket, reply),
            Err(e) => self.on_relay_failure(ticket, &e),
        }
    }

    /// Submit, dispatch and complete in one step. Returns true if the
    /// history gained a reply.
    pub async fn send(&mut self, relay: &dyn RelayClient, text: &str) -> bool {
        let Some(request) = self.submit(text) else {
            return false;
        };
        let outcome = relay.send(&request).await;
        self.complete(request.ticket, outcome)
    }

    /// Start a new chat
    pub fn reset(&mut self) {
        self.history.clear();
        self.draft.clear();
        self.in_flight = None;
        self.session = Uuid::new_v4();
    }
}

impl Default for ConversationManager {
    fn default() -> Self {
        Self::new()
    }
}
