//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{
    AlarmConfig, AppConfig, AudioConfig, LogLevel, NotificationsConfig, PomodoroConfig,
    StartView, ThemeConfig, UiConfig,
};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
