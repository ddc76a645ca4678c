//! Mock provider implementation for testing.

use super::{ChatMessage, CompletionProvider, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock completion provider: returns a canned response or a fixed failure,
/// and records the messages it was called with.
pub struct MockCompletionProvider {
    response: Result<String, String>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockCompletionProvider {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: impl Into<String>) -> Self {
        Self {
            response: Err(error.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Messages from the most recent call, if any.
    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        self.calls.lock().ok().and_then(|c| c.last().cloned())
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }

        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(error) => Err(ProviderError::ApiError(error.clone())),
        }
    }
}
