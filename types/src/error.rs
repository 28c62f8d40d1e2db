//! The two recognized error kinds of an interview turn.

use thiserror::Error;

/// Raised locally when an utterance is inadmissible for the current stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Interview error: {message}")]
pub struct InterviewError {
    message: String,
}

impl InterviewError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Raised by the theory store client when a call failed.
///
/// `detail` carries the long diagnostic (usually the raw reply body) when the
/// server sent one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Theory store error: {message}")]
pub struct StoreError {
    message: String,
    detail: Option<String>,
}

impl StoreError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}
