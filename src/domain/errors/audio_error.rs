//! Audio playback error types.

use thiserror::Error;

/// Audio playback error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AudioError {
    #[error("no async runtime available to drive playback")]
    RuntimeUnavailable,

    #[error("playback rejected: {message}")]
    Rejected { message: String },
}

impl AudioError {
    /// Creates rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}
