//! Chat types: messages, follow-up choices, and generation replies.
//!
//! The generation endpoint is an opaque external collaborator; the reply
//! type here is deliberately lenient about shape (optional fields, an
//! `options` alias for choices, unknown fields ignored) so that minor
//! contract drift degrades gracefully instead of breaking the session.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message in the session transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// An interactive follow-up suggestion attached to an assistant message.
/// Selecting one sends its `prompt` as the next user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupChoice {
    pub label: String,
    pub prompt: String,
}

/// A single message in the session transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<FollowupChoice>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: MessageRole::User,
            content: content.into(),
            choices: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create an assistant message with optional follow-up choices.
    pub fn assistant(content: impl Into<String>, choices: Vec<FollowupChoice>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: MessageRole::Assistant,
            content: content.into(),
            choices,
            created_at: Utc::now(),
        }
    }
}

/// Reply from the generation endpoint.
///
/// `files` is a partial source bundle keyed by relative path; absent means
/// "no file changes this turn". The endpoint historically used both
/// `choices` and `options` for the follow-up list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationReply {
    #[serde(default)]
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<BTreeMap<String, String>>,
    #[serde(default, alias = "options", skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<FollowupChoice>>,
}

/// Errors from generation endpoint calls.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation endpoint error: {message}")]
    Endpoint { message: String },

    #[error("generation reply malformed: {0}")]
    Deserialization(String),
}
