//! Errors that can end an interview turn.

use mosis_types::{InterviewError, Stage, StoreError, Trigger};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Interview(#[from] InterviewError),
    #[error("trigger {trigger} is not wired from stage {stage}")]
    InvalidTransition { trigger: Trigger, stage: Stage },
    #[error("export failed: {0:#}")]
    Export(anyhow::Error),
}

impl TurnError {
    /// Store and modeling errors are recovered by the outermost scope.
    /// Everything else propagates to the front end.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TurnError::Store(_) | TurnError::Interview(_))
    }

    /// The long diagnostic, when the store sent one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            TurnError::Store(err) => err.detail(),
            _ => None,
        }
    }
}
