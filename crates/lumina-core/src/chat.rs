//! Assistant chat session state.
//!
//! A [`ChatSession`] owns the append-only message history of one storefront
//! session and the request lifecycle around it. The lifecycle is an explicit
//! two-state machine:
//!
//! ```text
//! Idle --begin_send--> AwaitingReply --complete--> Idle
//! ```
//!
//! Only one reply can be outstanding at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Greeting the assistant opens every session with.
pub const GREETING: &str = "Hello! I'm Lumina, your personal interior design assistant. Looking for styling tips or help finding a product?";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single chat message. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier (UUID format)
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn turn(&self) -> ChatTurn {
        ChatTurn {
            role: self.role,
            text: self.text.clone(),
        }
    }
}

/// The part of a message the assistant backend sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Request lifecycle of the chat widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChatPhase {
    /// Waiting for the user to send something.
    #[default]
    Idle,
    /// A message was sent and its reply has not arrived yet.
    AwaitingReply,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("A reply is still pending")]
    ReplyPending,
    #[error("No reply is pending")]
    NoPendingReply,
}

/// Everything the gateway needs to produce the next reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    /// Every message that preceded `message`.
    pub history: Vec<ChatTurn>,
    /// The message just sent.
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    phase: ChatPhase,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Starts a session containing only the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Assistant, GREETING)],
            phase: ChatPhase::Idle,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.phase == ChatPhase::AwaitingReply
    }

    /// Records a user message and moves to `AwaitingReply`.
    ///
    /// Blank input and sends while a reply is pending are rejected without
    /// touching the history.
    pub fn begin_send(&mut self, input: &str) -> Result<PendingTurn, ChatError> {
        if self.is_awaiting_reply() {
            return Err(ChatError::ReplyPending);
        }
        if input.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let history = self.messages.iter().map(ChatMessage::turn).collect();
        self.messages.push(ChatMessage::new(ChatRole::User, input));
        self.phase = ChatPhase::AwaitingReply;

        Ok(PendingTurn {
            history,
            message: input.to_string(),
        })
    }

    /// Appends the reply (or fallback text) and returns to `Idle`.
    pub fn complete(&mut self, reply: impl Into<String>) -> Result<&ChatMessage, ChatError> {
        if !self.is_awaiting_reply() {
            return Err(ChatError::NoPendingReply);
        }
        self.messages
            .push(ChatMessage::new(ChatRole::Assistant, reply));
        self.phase = ChatPhase::Idle;
        self.messages.last().ok_or(ChatError::NoPendingReply)
    }
}
