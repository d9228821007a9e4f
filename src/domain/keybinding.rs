use crossterm::event::KeyEvent;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Back,

    // Menu
    NavigateUp,
    NavigateDown,
    Select,
    OpenAlarm,
    OpenPomodoro,

    // Alarm form / list
    NextField,
    PreviousField,
    SubmitAlarm,
    PreviousSound,
    NextSound,
    PreviewSound,
    ToggleAlarm,
    DeleteAlarm,

    // Ringing dialog
    Snooze,
    StopAlarm,

    // Pomodoro
    StartSession,
    PauseTimer,
    ResumeTimer,
    StopTimer,
    IncreaseFocus,
    DecreaseFocus,
    IncreaseBreak,
    DecreaseBreak,
    ToggleSound,
    Unlock,
}

impl Action {
    /// Footer label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::Back => "Menu",
            Self::NavigateUp => "Up",
            Self::NavigateDown => "Down",
            Self::Select => "Open",
            Self::OpenAlarm => "Alarms",
            Self::OpenPomodoro => "Pomodoro",
            Self::NextField => "Next",
            Self::PreviousField => "Prev",
            Self::SubmitAlarm => "Add",
            Self::PreviousSound | Self::NextSound => "Sound",
            Self::PreviewSound => "Preview",
            Self::ToggleAlarm => "On/Off",
            Self::DeleteAlarm => "Delete",
            Self::Snooze => "Snooze",
            Self::StopAlarm => "Stop",
            Self::StartSession => "Start",
            Self::PauseTimer => "Pause",
            Self::ResumeTimer => "Resume",
            Self::StopTimer => "Stop",
            Self::IncreaseFocus => "Focus+",
            Self::DecreaseFocus => "Focus-",
            Self::IncreaseBreak => "Break+",
            Self::DecreaseBreak => "Break-",
            Self::ToggleSound => "Sound",
            Self::Unlock => "Unlock",
        }
    }
}

/// Where keys are being interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyContext {
    #[default]
    Menu,
    /// Typing into the time or label field.
    AlarmForm,
    AlarmSound,
    AlarmList,
    Ringing,
    Pomodoro,
    FocusLock,
}

impl KeyContext {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Menu => "MENU",
            Self::AlarmForm => "NEW ALARM",
            Self::AlarmSound => "SOUND",
            Self::AlarmList => "ALARMS",
            Self::Ringing => "RINGING",
            Self::Pomodoro => "POMODORO",
            Self::FocusLock => "LOCKED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub key_display: Option<Cow<'static, str>>,
    pub visible_in_bar: bool,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            key_display: None,
            visible_in_bar: true,
        }
    }

    #[must_use]
    pub fn with_key_display(mut self, display: impl Into<Cow<'static, str>>) -> Self {
        self.key_display = Some(display.into());
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }
}
