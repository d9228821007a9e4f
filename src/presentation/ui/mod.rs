//! UI screens.

mod alarm_screen;
mod app;
mod menu_screen;
mod notification_popup;
mod pomodoro_screen;
mod utils;

pub use alarm_screen::{AlarmFocus, AlarmKeyResult, AlarmScreen};
pub use app::{App, AppPorts};
pub use menu_screen::{MenuResult, MenuScreen};
pub use notification_popup::NotificationPopup;
pub use pomodoro_screen::{PomodoroKeyResult, PomodoroScreen};

use crate::infrastructure::config::StartView;

/// Top-level views the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Tool picker.
    Menu,
    /// Alarm clock.
    Alarm,
    /// Pomodoro timer.
    Pomodoro,
}

impl From<StartView> for View {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Menu => Self::Menu,
            StartView::Alarm => Self::Alarm,
            StartView::Pomodoro => Self::Pomodoro,
        }
    }
}
