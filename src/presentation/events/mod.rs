//! Event handling.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Terminal event classification.
pub struct EventHandler;

impl EventHandler {
    /// Extracts a key press, ignoring repeats, releases and non-key events.
    #[must_use]
    pub fn key_press(event: &Event) -> Option<KeyEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(*key),
            _ => None,
        }
    }

    /// Checks if key quits from any screen.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Returns whether a terminal event should trigger a redraw.
    #[must_use]
    pub fn needs_redraw(event: &Event) -> bool {
        matches!(event, Event::Key(_) | Event::Resize(_, _) | Event::FocusGained)
    }
}
