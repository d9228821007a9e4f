//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::application::services::DEFAULT_SNOOZE_MINUTES;
use crate::domain::{PomodoroSettings, ResumeBehavior, Sound};

pub(crate) const APP_NAME: &str = "focusclock";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Screen shown at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StartView {
    /// Tool picker.
    #[default]
    Menu,
    /// Alarm clock.
    Alarm,
    /// Pomodoro timer.
    Pomodoro,
}

/// Application configuration, loaded from TOML and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Enable desktop notifications.
    #[serde(default = "default_true")]
    pub enable_desktop_notifications: bool,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Notification configuration.
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Audio configuration.
    #[serde(default)]
    pub audio: AudioConfig,

    /// Alarm clock configuration.
    #[serde(default)]
    pub alarm: AlarmConfig,

    /// Pomodoro configuration.
    #[serde(default)]
    pub pomodoro: PomodoroConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Toast duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Screen shown at startup.
    #[serde(default)]
    pub start_in: StartView,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
            start_in: StartView::default(),
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Enable internal TUI notifications.
    #[serde(default = "default_true")]
    pub internal_notifications: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            internal_notifications: true,
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

/// Audio configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Play sounds at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Alarm clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmConfig {
    /// Sound preselected in the new-alarm form. Must be an alarm sound.
    #[serde(default, deserialize_with = "deserialize_alarm_sound")]
    pub default_sound: Sound,

    /// Snooze length in minutes.
    #[serde(default = "default_snooze_minutes")]
    pub snooze_minutes: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            default_sound: Sound::default(),
            snooze_minutes: default_snooze_minutes(),
        }
    }
}

/// Pomodoro configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroConfig {
    /// Focus length in minutes (1-60).
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,

    /// Break length in minutes (1-30).
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,

    /// Play a sound when a phase ends.
    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    /// What a paused session resumes into.
    #[serde(default)]
    pub resume_behavior: ResumeBehavior,
}

impl PomodoroConfig {
    /// Returns the settings with durations clamped into their allowed ranges.
    #[must_use]
    pub fn settings(&self) -> PomodoroSettings {
        PomodoroSettings::clamped(self.focus_minutes, self.break_minutes, self.sound_enabled)
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
            sound_enabled: true,
            resume_behavior: ResumeBehavior::default(),
        }
    }
}

fn deserialize_alarm_sound<'de, D>(deserializer: D) -> Result<Sound, D::Error>
where
    D: Deserializer<'de>,
{
    let sound = Sound::deserialize(deserializer)?;
    if sound.is_alarm_sound() {
        Ok(sound)
    } else {
        warn!(
            sound = sound.id(),
            "default_sound is not an alarm sound, using {}",
            Sound::default().id()
        );
        Ok(Sound::default())
    }
}

fn default_accent_color() -> String {
    "Yellow".to_string()
}

fn default_true() -> bool {
    true
}

fn default_notification_duration() -> u64 {
    5
}

fn default_snooze_minutes() -> u32 {
    DEFAULT_SNOOZE_MINUTES
}

fn default_focus_minutes() -> u32 {
    25
}

fn default_break_minutes() -> u32 {
    5
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(notifications) = args.enable_desktop_notifications {
            self.enable_desktop_notifications = notifications;
        }
        if let Some(notification_duration) = args.notification_duration {
            self.ui.notification_duration = notification_duration;
        }
        if let Some(start_in) = args.start_in {
            self.ui.start_in = start_in;
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
        if args.mute {
            self.audio.enabled = false;
        }
        if let Some(focus_minutes) = args.focus_minutes {
            self.pomodoro.focus_minutes = focus_minutes;
        }
        if let Some(break_minutes) = args.break_minutes {
            self.pomodoro.break_minutes = break_minutes;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("focusclock.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            enable_desktop_notifications: true,
            ui: UiConfig::default(),
            notifications: NotificationsConfig::default(),
            theme: ThemeConfig::default(),
            audio: AudioConfig::default(),
            alarm: AlarmConfig::default(),
            pomodoro: PomodoroConfig::default(),
        }
    }
}
