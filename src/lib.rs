//! Focusclock - A terminal alarm clock and Pomodoro focus timer.
//!
//! This crate provides two tools behind a small menu: an alarm clock with
//! labelled, per-alarm sounds and snooze, and a Pomodoro timer with a
//! distraction-free focus lock.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the alarm, Pomodoro and toast services.
pub mod application;
/// Domain layer containing entities, errors, the Pomodoro state machine and ports.
pub mod domain;
/// Infrastructure layer containing audio, clock, config and notification adapters.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "focusclock";
