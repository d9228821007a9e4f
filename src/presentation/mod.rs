//! Presentation layer with screens, widgets and key handling.

/// Key binding registry.
pub mod commands;
/// Event handling.
pub mod events;
/// Accent color and derived styles.
pub mod theme;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::{App, AppPorts};
