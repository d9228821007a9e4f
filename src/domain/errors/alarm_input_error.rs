//! Alarm form input errors.

use thiserror::Error;

use crate::domain::entities::Sound;

/// Reasons an alarm submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum AlarmInputError {
    #[error("alarm time is empty")]
    EmptyTime,

    #[error("alarm label is empty")]
    EmptyLabel,

    #[error("invalid alarm time {input:?}, expected HH:MM")]
    InvalidTime { input: String },

    #[error("{sound} is not an alarm sound")]
    UnsupportedSound { sound: Sound },
}

impl AlarmInputError {
    /// Creates invalid time error.
    #[must_use]
    pub fn invalid_time(input: impl Into<String>) -> Self {
        Self::InvalidTime {
            input: input.into(),
        }
    }
}
