//! AI provider abstraction.
//!
//! The regeneration endpoint talks to a chat-completion API through the
//! `CompletionProvider` trait so tests can swap in a mock.

pub mod mock;
pub mod openrouter;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// One chat message, content given as typed parts.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<MessagePart>,
}

impl ChatMessage {
    pub fn system(parts: Vec<MessagePart>) -> Self {
        Self {
            role: "system".to_string(),
            content: parts,
        }
    }

    pub fn user(parts: Vec<MessagePart>) -> Self {
        Self {
            role: "user".to_string(),
            content: parts,
        }
    }
}

/// Content part; serializes as `{"type": "text", "text": ...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessagePart {
    Text { text: String },
}

/// Trait for chat-completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run a completion and return the first choice's message text. An
    /// absent or malformed choice shape yields an empty string, not an
    /// error.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;
}
