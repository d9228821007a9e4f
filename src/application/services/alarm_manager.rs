//! Alarm list, ringing state and per-second matching.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{Alarm, AlarmId, Sound, TimeOfDay};
use crate::domain::errors::AlarmInputError;
use crate::domain::ports::AudioPort;

/// Default snooze length in minutes.
pub const DEFAULT_SNOOZE_MINUTES: u32 = 5;

/// Unvalidated alarm form contents.
#[derive(Debug, Clone, Copy)]
pub struct AlarmDraft<'a> {
    pub time: &'a str,
    pub label: &'a str,
    pub sound: Sound,
}

impl<'a> AlarmDraft<'a> {
    #[must_use]
    pub const fn new(time: &'a str, label: &'a str, sound: Sound) -> Self {
        Self { time, label, sound }
    }

    fn validate(self) -> Result<(TimeOfDay, &'a str), AlarmInputError> {
        if self.time.trim().is_empty() {
            return Err(AlarmInputError::EmptyTime);
        }
        let label = self.label.trim();
        if label.is_empty() {
            return Err(AlarmInputError::EmptyLabel);
        }
        let time = self.time.parse()?;
        if !self.sound.is_alarm_sound() {
            return Err(AlarmInputError::UnsupportedSound { sound: self.sound });
        }
        Ok((time, label))
    }
}

/// Emitted when an alarm starts ringing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingEvent {
    pub id: AlarmId,
    pub time: TimeOfDay,
    pub label: String,
    pub sound: Sound,
}

/// Owns the alarm collection and decides when one rings.
pub struct AlarmManager {
    alarms: Vec<Alarm>,
    ringing: Option<AlarmId>,
    fired_minute: Option<TimeOfDay>,
    fired: HashSet<AlarmId>,
    snooze_minutes: u32,
    audio: Arc<dyn AudioPort>,
}

impl AlarmManager {
    #[must_use]
    pub fn new(audio: Arc<dyn AudioPort>) -> Self {
        Self {
            alarms: Vec::new(),
            ringing: None,
            fired_minute: None,
            fired: HashSet::new(),
            snooze_minutes: DEFAULT_SNOOZE_MINUTES,
            audio,
        }
    }

    /// Sets the snooze length, clamped to 1..=60 minutes.
    #[must_use]
    pub fn with_snooze_minutes(mut self, minutes: u32) -> Self {
        self.snooze_minutes = minutes.clamp(1, 60);
        self
    }

    /// Alarms in insertion order.
    #[must_use]
    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    #[must_use]
    pub fn get(&self, id: AlarmId) -> Option<&Alarm> {
        self.alarms.iter().find(|a| a.id() == id)
    }

    #[must_use]
    pub const fn snooze_minutes(&self) -> u32 {
        self.snooze_minutes
    }

    #[must_use]
    pub const fn ringing_id(&self) -> Option<AlarmId> {
        self.ringing
    }

    /// The alarm currently ringing, if it still exists.
    #[must_use]
    pub fn ringing_alarm(&self) -> Option<&Alarm> {
        self.ringing.and_then(|id| self.get(id))
    }

    /// Returns whether the ringing dialog should be shown.
    #[must_use]
    pub const fn is_ringing(&self) -> bool {
        self.ringing.is_some()
    }

    /// Validates a draft and appends it as an active alarm.
    ///
    /// # Errors
    /// Returns `AlarmInputError` for an empty label, an empty time, a time
    /// that isn't `HH:MM` or a sound outside the alarm catalog; the
    /// collection is left unchanged.
    pub fn add(&mut self, draft: AlarmDraft<'_>) -> Result<AlarmId, AlarmInputError> {
        let (time, label) = draft.validate()?;
        let alarm = Alarm::new(time, label, draft.sound);
        let id = alarm.id();
        info!(alarm_id = %id, time = %time, label, sound = draft.sound.id(), "Alarm added");
        self.alarms.push(alarm);
        Ok(id)
    }

    /// Removes an alarm. Returns whether anything was removed.
    pub fn delete(&mut self, id: AlarmId) -> bool {
        let before = self.alarms.len();
        self.alarms.retain(|a| a.id() != id);
        let removed = self.alarms.len() != before;

        if removed {
            info!(alarm_id = %id, "Alarm deleted");
            if self.ringing == Some(id) {
                self.ringing = None;
                self.audio.stop_looped();
            }
        }
        removed
    }

    /// Flips an alarm's active flag, returning the new value.
    pub fn toggle(&mut self, id: AlarmId) -> Option<bool> {
        let alarm = self.alarms.iter_mut().find(|a| a.id() == id)?;
        alarm.toggle();
        debug!(alarm_id = %id, active = alarm.is_active(), "Alarm toggled");
        Some(alarm.is_active())
    }

    /// Plays a sound on the preview channel.
    pub fn preview(&self, sound: Sound) {
        if let Err(e) = self.audio.preview(sound) {
            warn!(sound = sound.id(), error = %e, "Sound preview failed");
        }
    }

    /// Checks the alarms against the current minute.
    ///
    /// At most one alarm rings at a time, and each alarm rings at most once
    /// per matching minute.
    pub fn tick(&mut self, now: TimeOfDay) -> Option<RingEvent> {
        if self.fired_minute != Some(now) {
            self.fired.clear();
            self.fired_minute = Some(now);
        }

        if self.ringing.is_some() {
            return None;
        }

        let alarm = self
            .alarms
            .iter()
            .find(|a| a.is_due(now) && !self.fired.contains(&a.id()))?;

        let event = RingEvent {
            id: alarm.id(),
            time: alarm.time(),
            label: alarm.label().to_string(),
            sound: alarm.sound(),
        };

        self.ringing = Some(event.id);
        self.fired.insert(event.id);
        info!(alarm_id = %event.id, time = %event.time, label = %event.label, "Alarm ringing");

        if let Err(e) = self.audio.play_looped(event.sound) {
            warn!(sound = event.sound.id(), error = %e, "Alarm sound failed to start");
        }

        Some(event)
    }

    /// Dismisses the ringing alarm and schedules a snoozed copy.
    ///
    /// Returns the new alarm's id, or `None` when nothing was ringing.
    pub fn snooze(&mut self, now: TimeOfDay) -> Option<AlarmId> {
        let id = self.dismiss()?;
        let original = self.get(id)?;
        let snoozed = original.snoozed(now.add_minutes(self.snooze_minutes));
        let new_id = snoozed.id();

        info!(
            alarm_id = %id,
            snoozed_id = %new_id,
            time = %snoozed.time(),
            "Alarm snoozed"
        );
        self.alarms.push(snoozed);
        Some(new_id)
    }

    /// Dismisses the ringing alarm without creating anything.
    pub fn stop(&mut self) -> bool {
        self.dismiss()
            .inspect(|id| info!(alarm_id = %id, "Alarm stopped"))
            .is_some()
    }

    fn dismiss(&mut self) -> Option<AlarmId> {
        let id = self.ringing.take()?;
        self.audio.stop_looped();
        Some(id)
    }
}
