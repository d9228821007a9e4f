//! Pomodoro settings errors.

use thiserror::Error;

/// Reasons a settings edit is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum SettingsError {
    #[error("durations can only be changed while the timer is idle")]
    SessionActive,

    #[error("{field} must be between {min} and {max} minutes, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}
