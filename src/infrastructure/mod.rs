//! Infrastructure layer with host adapters.

/// Terminal bell audio.
pub mod audio;
/// Host wall clock.
pub mod clock;
/// Application configuration.
pub mod config;
/// Desktop notifications.
pub mod notifications;
/// Per-screen tick source.
pub mod ticker;

pub use audio::TerminalAudio;
pub use clock::SystemClock;
pub use config::{AppConfig, CliArgs, LogLevel, StartView, StorageManager};
pub use notifications::DesktopNotificationService;
pub use ticker::{TICK_PERIOD, Tick, Ticker};
