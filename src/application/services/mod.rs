pub mod alarm_manager;
pub mod notification_manager;
pub mod pomodoro_service;

pub use alarm_manager::{AlarmDraft, AlarmManager, DEFAULT_SNOOZE_MINUTES, RingEvent};
pub use notification_manager::NotificationManager;
pub use pomodoro_service::PomodoroService;
