//! Chat sheet session - "ask the book"
//!
//! The sheet keeps a transcript for as long as it is open. Replies come from
//! a `Responder`; the reading surface delivers them after a simulated
//! thinking delay.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Greeting shown when the sheet opens
const GREETING: &str = "Ask me anything about what you are reading. \
I can explain passages, summarise chapters, or give background on the ideas in the book.";

/// Reply of the built-in responder
pub const CANNED_REPLY: &str =
    "I'm sorry, I don't have enough information to answer that question specifically.";

/// Unique identifier for a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One bubble in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub text: String,
    pub from_user: bool,
}

impl ChatMessage {
    fn user(text: String) -> Self {
        Self {
            id: MessageId::new(),
            text,
            from_user: true,
        }
    }

    fn assistant(text: String) -> Self {
        Self {
            id: MessageId::new(),
            text,
            from_user: false,
        }
    }
}

/// Produces assistant replies
pub trait Responder {
    fn respond(&mut self, question: &str, book_title: &str) -> String;
}

/// Always answers with the same apology
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedResponder;

impl Responder for CannedResponder {
    fn respond(&mut self, _question: &str, _book_title: &str) -> String {
        CANNED_REPLY.to_string()
    }
}

/// Transcript and pending question of an open chat sheet
#[derive(Debug, Clone)]
pub struct ChatSession {
    book_title: String,
    messages: Vec<ChatMessage>,
    pending_question: Option<String>,
}

impl ChatSession {
    /// Open a session; the transcript starts with a greeting
    pub fn new(book_title: impl Into<String>) -> Self {
        Self {
            book_title: book_title.into(),
            messages: vec![ChatMessage::assistant(GREETING.to_string())],
            pending_question: None,
        }
    }

    /// Header title of the sheet
    pub fn title(&self) -> String {
        format!("Chat: {}", self.book_title)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a reply is on its way
    pub fn is_thinking(&self) -> bool {
        self.pending_question.is_some()
    }

    /// Add a user message. Blank input is ignored.
    ///
    /// Sending again before the reply arrives replaces the pending question,
    /// so only one reply is ever outstanding.
    pub fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.pending_question = Some(text.to_string());
        self.messages.push(ChatMessage::user(text.to_string()));
        self.messages.last()
    }

    /// Deliver the reply to the pending question, if any
    pub fn receive(&mut self, responder: &mut dyn Responder) -> Option<&ChatMessage> {
        let question = self.pending_question.take()?;
        let reply = responder.respond(&question, &self.book_title);
        self.messages.push(ChatMessage::assistant(reply));
        self.messages.last()
    }
}
