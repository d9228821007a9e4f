//! Domain entities.

mod alarm;
mod sound;
mod time_of_day;

pub use alarm::{Alarm, AlarmId};
pub use sound::{BellPattern, Sound, SoundAsset};
pub use time_of_day::TimeOfDay;
