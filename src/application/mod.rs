//! Application layer with the alarm and Pomodoro services.

/// Stateful services driven by the presentation layer.
pub mod services;

pub use services::{AlarmDraft, AlarmManager, NotificationManager, PomodoroService, RingEvent};
