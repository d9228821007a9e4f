//! Domain layer with core entities, the Pomodoro state machine and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// In-app notifications.
pub mod notification;
/// Pomodoro state machine.
pub mod pomodoro;
/// Port definitions.
pub mod ports;

pub use entities::{Alarm, AlarmId, Sound, SoundAsset, TimeOfDay};
pub use errors::{AlarmInputError, AudioError, SettingsError};
pub use notification::{Notification, NotificationLevel};
pub use pomodoro::{
    Countdown, Phase, PomodoroSettings, PomodoroTimer, ResumeBehavior, TickOutcome, TimerState,
};
pub use ports::{AudioPort, ClockPort, NotificationPort};
