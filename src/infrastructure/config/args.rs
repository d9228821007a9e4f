use super::app_config::{LogLevel, StartView};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "focusclock",
    version,
    about = "A terminal alarm clock and Pomodoro focus timer",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable desktop notifications.
    #[arg(long)]
    pub enable_desktop_notifications: Option<bool>,

    /// Toast duration in seconds.
    #[arg(long)]
    pub notification_duration: Option<u64>,

    /// Screen shown at startup.
    #[arg(long, value_enum)]
    pub start_in: Option<StartView>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,

    /// Silence all sounds.
    #[arg(long)]
    pub mute: bool,

    /// Focus length in minutes.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub focus_minutes: Option<u32>,

    /// Break length in minutes.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=30))]
    pub break_minutes: Option<u32>,
}
