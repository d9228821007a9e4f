//! Alarm entity.

use std::fmt;

use uuid::Uuid;

use super::{Sound, TimeOfDay};

/// Alarm identifier, ordered by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlarmId(Uuid);

impl AlarmId {
    /// Generates a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-configured alarm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    id: AlarmId,
    time: TimeOfDay,
    label: String,
    active: bool,
    sound: Sound,
}

impl Alarm {
    /// Creates an active alarm with a fresh identifier.
    #[must_use]
    pub fn new(time: TimeOfDay, label: impl Into<String>, sound: Sound) -> Self {
        Self {
            id: AlarmId::generate(),
            time,
            label: label.into(),
            active: true,
            sound,
        }
    }

    /// Derives the snoozed copy of this alarm, leaving `self` untouched.
    #[must_use]
    pub fn snoozed(&self, time: TimeOfDay) -> Self {
        Self {
            id: AlarmId::generate(),
            time,
            label: format!("{} (Snoozed)", self.label),
            active: true,
            sound: self.sound,
        }
    }

    #[must_use]
    pub const fn id(&self) -> AlarmId {
        self.id
    }

    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn sound(&self) -> Sound {
        self.sound
    }

    /// Flips the active flag.
    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    /// Returns whether this alarm is due at the given minute.
    #[must_use]
    pub fn is_due(&self, now: TimeOfDay) -> bool {
        self.active && self.time == now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven() -> TimeOfDay {
        TimeOfDay::new(7, 0).unwrap()
    }

    #[test]
    fn test_new_alarm_is_active() {
        let alarm = Alarm::new(seven(), "Wake up", Sound::GentleChime);
        assert!(alarm.is_active());
        assert_eq!(alarm.label(), "Wake up");
        assert_eq!(alarm.sound(), Sound::GentleChime);
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let first = Alarm::new(seven(), "a", Sound::ClassicAlarm);
        let second = Alarm::new(seven(), "b", Sound::ClassicAlarm);
        assert_ne!(first.id(), second.id());
        assert!(first.id() < second.id());
    }

    #[test]
    fn test_snoozed_copy() {
        let alarm = Alarm::new(seven(), "Wake up", Sound::DigitalBeep);
        let snoozed = alarm.snoozed(seven().add_minutes(5));

        assert_ne!(snoozed.id(), alarm.id());
        assert_eq!(snoozed.label(), "Wake up (Snoozed)");
        assert_eq!(snoozed.time().to_string(), "07:05");
        assert_eq!(snoozed.sound(), Sound::DigitalBeep);
        assert!(snoozed.is_active());
    }

    #[test]
    fn test_inactive_alarm_is_never_due() {
        let mut alarm = Alarm::new(seven(), "Wake up", Sound::ClassicAlarm);
        assert!(alarm.is_due(seven()));
        alarm.toggle();
        assert!(!alarm.is_due(seven()));
    }
}
