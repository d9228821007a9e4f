//! Sound catalog.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a sound is rendered on a terminal bell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BellPattern {
    /// Number of bell strikes per cycle.
    pub strikes: u8,
    /// Pause between strikes.
    pub gap: Duration,
    /// Pause between cycles when looping.
    pub cycle: Duration,
}

impl BellPattern {
    const fn new(strikes: u8, gap_ms: u64, cycle_ms: u64) -> Self {
        Self {
            strikes,
            gap: Duration::from_millis(gap_ms),
            cycle: Duration::from_millis(cycle_ms),
        }
    }
}

/// Static descriptor for a playable sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundAsset {
    /// Short identifier used in config files.
    pub id: &'static str,
    /// Human readable name.
    pub display_name: &'static str,
    /// Asset file reference.
    pub file: &'static str,
    /// Freedesktop sound theme name, used as a desktop notification hint.
    pub theme_name: &'static str,
    /// Terminal rendition.
    pub pattern: BellPattern,
}

/// Known sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sound {
    /// Loud repeating alarm.
    #[default]
    ClassicAlarm,
    /// Soft single chime.
    GentleChime,
    /// Short double beep.
    DigitalBeep,
    /// Pomodoro phase completion.
    Notification,
}

const CLASSIC_ALARM: SoundAsset = SoundAsset {
    id: "classic-alarm",
    display_name: "Classic Alarm",
    file: "sounds/classic-alarm.mp3",
    theme_name: "alarm-clock-elapsed",
    pattern: BellPattern::new(3, 150, 1000),
};

const GENTLE_CHIME: SoundAsset = SoundAsset {
    id: "gentle-chime",
    display_name: "Gentle Chime",
    file: "sounds/gentle-chime.mp3",
    theme_name: "bell",
    pattern: BellPattern::new(1, 0, 2000),
};

const DIGITAL_BEEP: SoundAsset = SoundAsset {
    id: "digital-beep",
    display_name: "Digital Beep",
    file: "sounds/digital-beep.mp3",
    theme_name: "dialog-warning",
    pattern: BellPattern::new(2, 80, 800),
};

const NOTIFICATION: SoundAsset = SoundAsset {
    id: "notification",
    display_name: "Notification",
    file: "sounds/notification.mp3",
    theme_name: "complete",
    pattern: BellPattern::new(2, 200, 1000),
};

impl Sound {
    /// Sounds offered for alarms, in display order.
    pub const ALARM_CATALOG: [Self; 3] = [Self::ClassicAlarm, Self::GentleChime, Self::DigitalBeep];

    /// Returns whether alarms may use this sound.
    #[must_use]
    pub fn is_alarm_sound(self) -> bool {
        Self::ALARM_CATALOG.contains(&self)
    }

    /// Resolves the asset descriptor.
    #[must_use]
    pub const fn asset(self) -> &'static SoundAsset {
        match self {
            Self::ClassicAlarm => &CLASSIC_ALARM,
            Self::GentleChime => &GENTLE_CHIME,
            Self::DigitalBeep => &DIGITAL_BEEP,
            Self::Notification => &NOTIFICATION,
        }
    }

    #[must_use]
    pub const fn id(self) -> &'static str {
        self.asset().id
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        self.asset().display_name
    }

    /// Next alarm sound in catalog order, wrapping around.
    #[must_use]
    pub fn next_alarm_sound(self) -> Self {
        let catalog = Self::ALARM_CATALOG;
        let idx = catalog.iter().position(|s| *s == self).map_or(0, |i| i + 1);
        catalog[idx % catalog.len()]
    }

    /// Previous alarm sound in catalog order, wrapping around.
    #[must_use]
    pub fn previous_alarm_sound(self) -> Self {
        let catalog = Self::ALARM_CATALOG;
        let idx = catalog.iter().position(|s| *s == self).unwrap_or(0);
        catalog[(idx + catalog.len() - 1) % catalog.len()]
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
