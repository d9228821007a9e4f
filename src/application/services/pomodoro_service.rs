//! Pomodoro timer with completion sounds.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::Sound;
use crate::domain::errors::SettingsError;
use crate::domain::ports::AudioPort;
use crate::domain::pomodoro::{PomodoroSettings, PomodoroTimer, ResumeBehavior, TickOutcome};

/// Drives a [`PomodoroTimer`] and plays the completion sound.
pub struct PomodoroService {
    timer: PomodoroTimer,
    audio: Arc<dyn AudioPort>,
}

impl PomodoroService {
    #[must_use]
    pub fn new(
        settings: PomodoroSettings,
        resume_behavior: ResumeBehavior,
        audio: Arc<dyn AudioPort>,
    ) -> Self {
        Self {
            timer: PomodoroTimer::new(settings, resume_behavior),
            audio,
        }
    }

    #[must_use]
    pub const fn timer(&self) -> &PomodoroTimer {
        &self.timer
    }

    pub fn start(&mut self) -> bool {
        let started = self.timer.start();
        if started {
            info!(
                minutes = self.timer.settings().focus_minutes,
                "Focus session started"
            );
        }
        started
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.timer.pause();
        if paused {
            debug!(remaining = %self.timer.remaining(), "Timer paused");
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        let resumed = self.timer.resume();
        if resumed {
            debug!(state = ?self.timer.state(), "Timer resumed");
        }
        resumed
    }

    pub fn stop(&mut self) -> bool {
        let stopped = self.timer.stop();
        if stopped {
            info!("Timer stopped");
        }
        stopped
    }

    pub fn unlock(&mut self) {
        if self.timer.is_locked() {
            info!(remaining = %self.timer.remaining(), "Focus lock released early");
        }
        self.timer.unlock();
    }

    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.timer.toggle_sound();
        debug!(enabled, "Completion sound toggled");
        enabled
    }

    /// Shifts the focus length by `delta` minutes.
    ///
    /// # Errors
    /// Returns `SettingsError` if a session is active or the result is out of range.
    pub fn adjust_focus(&mut self, delta: i32) -> Result<u32, SettingsError> {
        let minutes = shifted(self.timer.settings().focus_minutes, delta);
        self.timer.set_focus_minutes(minutes)?;
        Ok(minutes)
    }

    /// Shifts the break length by `delta` minutes.
    ///
    /// # Errors
    /// Returns `SettingsError` if a session is active or the result is out of range.
    pub fn adjust_break(&mut self, delta: i32) -> Result<u32, SettingsError> {
        let minutes = shifted(self.timer.settings().break_minutes, delta);
        self.timer.set_break_minutes(minutes)?;
        Ok(minutes)
    }

    /// Advances one second, playing the notification sound when a phase ends.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.timer.tick();

        match outcome {
            TickOutcome::FocusCompleted { completed_sessions } => {
                info!(completed_sessions, "Focus session complete, break started");
            }
            TickOutcome::BreakCompleted => info!("Break complete"),
            TickOutcome::Stopped | TickOutcome::Counted => {}
        }

        if outcome.is_phase_end()
            && self.timer.settings().sound_enabled
            && let Err(e) = self.audio.play_once(Sound::Notification)
        {
            warn!(error = %e, "Completion sound failed");
        }

        outcome
    }
}

fn shifted(current: u32, delta: i32) -> u32 {
    current.saturating_add_signed(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AudioError;
    use crate::domain::ports::mocks::MockAudioPort;
    use crate::domain::pomodoro::TimerState;

    fn service(settings: PomodoroSettings, audio: MockAudioPort) -> PomodoroService {
        PomodoroService::new(settings, ResumeBehavior::RestorePhase, Arc::new(audio))
    }

    #[test]
    fn test_plays_notification_on_each_phase_end() {
        let mut audio = MockAudioPort::new();
        audio
            .expect_play_once()
            .withf(|sound| *sound == Sound::Notification)
            .times(2)
            .returning(|_| Ok(()));

        let mut service = service(PomodoroSettings::clamped(1, 1, true), audio);
        service.start();

        let outcomes: Vec<_> = (0..120).map(|_| service.tick()).collect();
        assert_eq!(
            outcomes[59],
            TickOutcome::FocusCompleted {
                completed_sessions: 1
            }
        );
        assert_eq!(outcomes[119], TickOutcome::BreakCompleted);
        assert_eq!(service.timer().state(), TimerState::Idle);
    }

    #[test]
    fn test_muted_timer_stays_silent() {
        let mut audio = MockAudioPort::new();
        audio.expect_play_once().never();

        let mut service = service(PomodoroSettings::clamped(1, 1, false), audio);
        service.start();
        for _ in 0..60 {
            service.tick();
        }
        assert_eq!(service.timer().state(), TimerState::Break);
    }

    #[test]
    fn test_sound_failure_does_not_block_transition() {
        let mut audio = MockAudioPort::new();
        audio
            .expect_play_once()
            .returning(|_| Err(AudioError::RuntimeUnavailable));

        let mut service = service(PomodoroSettings::clamped(1, 1, true), audio);
        service.start();
        for _ in 0..60 {
            service.tick();
        }
        assert_eq!(service.timer().state(), TimerState::Break);
        assert_eq!(service.timer().completed_sessions(), 1);
    }

    #[test]
    fn test_adjust_rejected_while_running() {
        let mut service = service(PomodoroSettings::default(), MockAudioPort::new());
        assert_eq!(service.adjust_focus(5), Ok(30));
        assert_eq!(service.adjust_break(-1), Ok(4));

        service.start();
        assert_eq!(service.adjust_focus(5), Err(SettingsError::SessionActive));
        assert_eq!(service.timer().settings().focus_minutes, 30);
    }

    #[test]
    fn test_adjust_below_range_rejected() {
        let mut service = service(
            PomodoroSettings::clamped(1, 1, true),
            MockAudioPort::new(),
        );
        assert!(matches!(
            service.adjust_focus(-1),
            Err(SettingsError::OutOfRange { .. })
        ));
        assert_eq!(service.timer().settings().focus_minutes, 1);
    }
}
