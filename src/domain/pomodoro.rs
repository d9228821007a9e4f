//! Pomodoro countdown state machine.
//!
//! All time flows through [`PomodoroTimer::tick`], one call per elapsed
//! second. The tick that brings the countdown to `00:00` performs the phase
//! transition, so the countdown never goes negative.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::domain::errors::SettingsError;

/// Allowed focus lengths in minutes.
pub const FOCUS_MINUTES_RANGE: RangeInclusive<u32> = 1..=60;
/// Allowed break lengths in minutes.
pub const BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=30;

/// Counting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Focus,
    Break,
}

/// Timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Focus,
    Break,
    /// Frozen countdown, remembering which phase was interrupted.
    Paused(Phase),
}

impl TimerState {
    /// Returns whether ticks advance the countdown.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Focus | Self::Break)
    }

    /// Returns the phase being counted, paused or not.
    #[must_use]
    pub const fn phase(self) -> Option<Phase> {
        match self {
            Self::Idle => None,
            Self::Focus => Some(Phase::Focus),
            Self::Break => Some(Phase::Break),
            Self::Paused(phase) => Some(phase),
        }
    }

    /// Short description for the stats panel.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Focus => "Focusing",
            Self::Break => "On Break",
            Self::Paused(_) => "Paused",
        }
    }
}

/// What a paused session resumes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResumeBehavior {
    /// Resume the phase that was paused.
    #[default]
    RestorePhase,
    /// Always resume as a focus phase, even when a break was paused.
    AlwaysFocus,
}

/// Remaining time as minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    minutes: u32,
    seconds: u32,
}

impl Countdown {
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self {
            minutes,
            seconds: 0,
        }
    }

    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(self) -> u32 {
        self.seconds
    }

    #[must_use]
    pub const fn total_seconds(self) -> u32 {
        self.minutes * 60 + self.seconds
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    /// Counts down one second, rolling `m:00` over to `(m-1):59`.
    /// Does nothing at `00:00`.
    fn decrement(&mut self) {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// User-editable durations and the completion sound toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroSettings {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub sound_enabled: bool,
}

impl PomodoroSettings {
    /// Creates settings with durations clamped into their allowed ranges.
    #[must_use]
    pub fn clamped(focus_minutes: u32, break_minutes: u32, sound_enabled: bool) -> Self {
        Self {
            focus_minutes: focus_minutes
                .clamp(*FOCUS_MINUTES_RANGE.start(), *FOCUS_MINUTES_RANGE.end()),
            break_minutes: break_minutes
                .clamp(*BREAK_MINUTES_RANGE.start(), *BREAK_MINUTES_RANGE.end()),
            sound_enabled,
        }
    }

    const fn minutes_for(self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_minutes,
            Phase::Break => self.break_minutes,
        }
    }
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
            sound_enabled: true,
        }
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is idle or paused; nothing changed.
    Stopped,
    /// Countdown advanced by one second.
    Counted,
    /// Focus phase finished and a break started.
    FocusCompleted { completed_sessions: u32 },
    /// Break finished and the timer went idle.
    BreakCompleted,
}

impl TickOutcome {
    /// Returns whether the tick ended a phase.
    #[must_use]
    pub const fn is_phase_end(self) -> bool {
        matches!(self, Self::FocusCompleted { .. } | Self::BreakCompleted)
    }
}

/// Focus/break countdown with screen-lock and session counting.
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    settings: PomodoroSettings,
    resume_behavior: ResumeBehavior,
    state: TimerState,
    remaining: Countdown,
    locked: bool,
    completed_sessions: u32,
    focus_minutes_total: u32,
}

impl PomodoroTimer {
    #[must_use]
    pub fn new(settings: PomodoroSettings, resume_behavior: ResumeBehavior) -> Self {
        Self {
            settings,
            resume_behavior,
            state: TimerState::Idle,
            remaining: Countdown::from_minutes(settings.focus_minutes),
            locked: false,
            completed_sessions: 0,
            focus_minutes_total: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub const fn remaining(&self) -> Countdown {
        self.remaining
    }

    #[must_use]
    pub const fn settings(&self) -> PomodoroSettings {
        self.settings
    }

    #[must_use]
    pub const fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    /// Minutes spent in completed focus phases.
    #[must_use]
    pub const fn focus_minutes_total(&self) -> u32 {
        self.focus_minutes_total
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns whether the restricted focus view should replace the normal one.
    #[must_use]
    pub fn is_lock_view_active(&self) -> bool {
        self.locked && self.state == TimerState::Focus
    }

    /// Starts a focus phase from idle and enters lock mode.
    pub fn start(&mut self) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        self.remaining = Countdown::from_minutes(self.settings.focus_minutes);
        self.state = TimerState::Focus;
        self.locked = true;
        true
    }

    /// Freezes a running phase.
    pub fn pause(&mut self) -> bool {
        let phase = match self.state {
            TimerState::Focus => Phase::Focus,
            TimerState::Break => Phase::Break,
            TimerState::Idle | TimerState::Paused(_) => return false,
        };
        self.state = TimerState::Paused(phase);
        true
    }

    /// Resumes a paused phase with time left on the clock.
    pub fn resume(&mut self) -> bool {
        let TimerState::Paused(phase) = self.state else {
            return false;
        };
        if self.remaining.is_zero() {
            return false;
        }
        self.state = match (self.resume_behavior, phase) {
            (ResumeBehavior::AlwaysFocus, _) | (ResumeBehavior::RestorePhase, Phase::Focus) => {
                TimerState::Focus
            }
            (ResumeBehavior::RestorePhase, Phase::Break) => TimerState::Break,
        };
        true
    }

    /// Abandons the session and returns to idle.
    pub fn stop(&mut self) -> bool {
        if self.state == TimerState::Idle {
            return false;
        }
        self.reset_to_idle();
        self.locked = false;
        true
    }

    /// Hides the lock view without affecting the countdown.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Stopped;
        }

        self.remaining.decrement();
        if !self.remaining.is_zero() {
            return TickOutcome::Counted;
        }

        match self.state {
            TimerState::Focus => {
                self.completed_sessions += 1;
                self.focus_minutes_total += self.settings.focus_minutes;
                self.state = TimerState::Break;
                self.remaining = Countdown::from_minutes(self.settings.break_minutes);
                self.locked = false;
                TickOutcome::FocusCompleted {
                    completed_sessions: self.completed_sessions,
                }
            }
            _ => {
                self.reset_to_idle();
                TickOutcome::BreakCompleted
            }
        }
    }

    /// Percentage of the current phase already elapsed, in `0.0..=100.0`.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let Some(phase) = self.state.phase() else {
            return 0.0;
        };
        let total = self.settings.minutes_for(phase) * 60;
        if total == 0 {
            return 0.0;
        }
        let elapsed = f64::from(total) - f64::from(self.remaining.total_seconds());
        (elapsed / f64::from(total) * 100.0).clamp(0.0, 100.0)
    }

    /// Changes the focus length. Only allowed while idle.
    ///
    /// # Errors
    /// Returns `SettingsError` if a session is active or the value is out of range.
    pub fn set_focus_minutes(&mut self, minutes: u32) -> Result<(), SettingsError> {
        self.ensure_editable()?;
        check_range("focus length", minutes, &FOCUS_MINUTES_RANGE)?;
        self.settings.focus_minutes = minutes;
        self.remaining = Countdown::from_minutes(minutes);
        Ok(())
    }

    /// Changes the break length. Only allowed while idle.
    ///
    /// # Errors
    /// Returns `SettingsError` if a session is active or the value is out of range.
    pub fn set_break_minutes(&mut self, minutes: u32) -> Result<(), SettingsError> {
        self.ensure_editable()?;
        check_range("break length", minutes, &BREAK_MINUTES_RANGE)?;
        self.settings.break_minutes = minutes;
        Ok(())
    }

    /// Flips the completion sound toggle. Allowed in any state.
    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound_enabled = !self.settings.sound_enabled;
        self.settings.sound_enabled
    }

    fn ensure_editable(&self) -> Result<(), SettingsError> {
        if self.state == TimerState::Idle {
            Ok(())
        } else {
            Err(SettingsError::SessionActive)
        }
    }

    fn reset_to_idle(&mut self) {
        self.state = TimerState::Idle;
        self.remaining = Countdown::from_minutes(self.settings.focus_minutes);
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(PomodoroSettings::default(), ResumeBehavior::default())
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), SettingsError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn timer(focus: u32, brk: u32) -> PomodoroTimer {
        PomodoroTimer::new(
            PomodoroSettings::clamped(focus, brk, true),
            ResumeBehavior::RestorePhase,
        )
    }

    fn tick_n(timer: &mut PomodoroTimer, n: usize) -> Vec<TickOutcome> {
        (0..n).map(|_| timer.tick()).collect()
    }

    #[test]
    fn test_initial_state() {
        let timer = PomodoroTimer::default();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining().to_string(), "25:00");
        assert!(!timer.is_locked());
        assert_eq!(timer.completed_sessions(), 0);
    }

    #[test]
    fn test_start_enters_focus_and_locks() {
        let mut timer = timer(25, 5);
        assert!(timer.start());
        assert_eq!(timer.state(), TimerState::Focus);
        assert!(timer.is_locked());
        assert!(timer.is_lock_view_active());
        assert!(!timer.start());
    }

    #[test]
    fn test_first_tick_rolls_minute() {
        let mut timer = timer(25, 5);
        timer.start();
        assert_eq!(timer.tick(), TickOutcome::Counted);
        assert_eq!(timer.remaining().to_string(), "24:59");
    }

    #[test]
    fn test_focus_minute_completes_after_sixty_ticks() {
        let mut timer = timer(1, 1);
        timer.start();

        let outcomes = tick_n(&mut timer, 59);
        assert!(outcomes.iter().all(|o| *o == TickOutcome::Counted));
        assert_eq!(timer.state(), TimerState::Focus);
        assert_eq!(timer.remaining().to_string(), "00:01");

        assert_eq!(
            timer.tick(),
            TickOutcome::FocusCompleted {
                completed_sessions: 1
            }
        );
        assert_eq!(timer.state(), TimerState::Break);
        assert_eq!(timer.completed_sessions(), 1);
        assert_eq!(timer.remaining(), Countdown::from_minutes(1));
        assert!(!timer.is_locked());
    }

    #[test]
    fn test_break_minute_returns_to_idle_after_sixty_ticks() {
        let mut timer = timer(2, 1);
        timer.start();
        tick_n(&mut timer, 120);
        assert_eq!(timer.state(), TimerState::Break);

        let outcomes = tick_n(&mut timer, 60);
        assert_eq!(outcomes.last(), Some(&TickOutcome::BreakCompleted));
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining(), Countdown::from_minutes(2));
        assert_eq!(timer.completed_sessions(), 1);
        assert_eq!(timer.focus_minutes_total(), 2);
    }

    #[test]
    fn test_idle_and_paused_ticks_do_nothing() {
        let mut timer = timer(1, 1);
        assert_eq!(timer.tick(), TickOutcome::Stopped);

        timer.start();
        timer.tick();
        timer.pause();
        let frozen = timer.remaining();
        assert_eq!(tick_n(&mut timer, 10), vec![TickOutcome::Stopped; 10]);
        assert_eq!(timer.remaining(), frozen);
    }

    #[test]
    fn test_progress_bounds() {
        let mut timer = timer(1, 1);
        timer.start();
        assert!(timer.progress_percent().abs() < f64::EPSILON);

        tick_n(&mut timer, 59);
        let last = timer.progress_percent();
        assert!(last > 95.0 && last < 100.0);

        timer.tick();
        assert_eq!(timer.state(), TimerState::Break);
        assert!(timer.progress_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_idle_is_zero() {
        assert!(PomodoroTimer::default().progress_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn test_settings_locked_while_active() {
        let mut timer = timer(25, 5);
        timer.start();
        assert_eq!(timer.set_focus_minutes(10), Err(SettingsError::SessionActive));
        assert_eq!(timer.set_break_minutes(10), Err(SettingsError::SessionActive));

        timer.pause();
        assert_eq!(timer.set_focus_minutes(10), Err(SettingsError::SessionActive));

        assert_eq!(timer.settings().focus_minutes, 25);
        assert_eq!(timer.settings().break_minutes, 5);
    }

    #[test]
    fn test_focus_edit_while_idle_resets_countdown() {
        let mut timer = timer(25, 5);
        timer.set_focus_minutes(40).unwrap();
        assert_eq!(timer.remaining().to_string(), "40:00");
    }

    #[test_case(0, false ; "below_min")]
    #[test_case(1, true ; "min")]
    #[test_case(60, true ; "max")]
    #[test_case(61, false ; "above_max")]
    fn test_focus_range(value: u32, ok: bool) {
        let mut timer = timer(25, 5);
        assert_eq!(timer.set_focus_minutes(value).is_ok(), ok);
    }

    #[test_case(30, true ; "max")]
    #[test_case(31, false ; "above_max")]
    fn test_break_range(value: u32, ok: bool) {
        let mut timer = timer(25, 5);
        assert_eq!(timer.set_break_minutes(value).is_ok(), ok);
    }

    #[test]
    fn test_sound_toggle_any_state() {
        let mut timer = timer(25, 5);
        timer.start();
        assert!(!timer.toggle_sound());
        assert!(timer.toggle_sound());
    }

    #[test]
    fn test_stop_resets() {
        let mut timer = timer(25, 5);
        timer.start();
        tick_n(&mut timer, 30);
        assert!(timer.stop());
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining().to_string(), "25:00");
        assert!(!timer.is_locked());
        assert!(!timer.stop());
    }

    #[test]
    fn test_resume_restores_break_phase() {
        let mut timer = timer(1, 5);
        timer.start();
        tick_n(&mut timer, 60);
        assert!(timer.pause());
        assert_eq!(timer.state(), TimerState::Paused(Phase::Break));
        assert!(timer.resume());
        assert_eq!(timer.state(), TimerState::Break);
    }

    #[test]
    fn test_always_focus_resume_collapses_break() {
        let mut timer = PomodoroTimer::new(
            PomodoroSettings::clamped(1, 5, true),
            ResumeBehavior::AlwaysFocus,
        );
        timer.start();
        tick_n(&mut timer, 60);
        timer.pause();
        assert!(timer.resume());
        assert_eq!(timer.state(), TimerState::Focus);
        assert!(timer.progress_percent() <= 100.0);
    }

    #[test]
    fn test_unlock_keeps_counting() {
        let mut timer = timer(25, 5);
        timer.start();
        timer.unlock();
        assert!(!timer.is_lock_view_active());
        assert_eq!(timer.state(), TimerState::Focus);
        assert_eq!(timer.tick(), TickOutcome::Counted);
    }

    #[test]
    fn test_clamped_settings() {
        let settings = PomodoroSettings::clamped(0, 99, false);
        assert_eq!(settings.focus_minutes, 1);
        assert_eq!(settings.break_minutes, 30);
    }
}
