//! Wall-clock port definition.

use chrono::NaiveTime;

/// Port for reading host-local time.
pub trait ClockPort: Send + Sync {
    /// Returns the current local time of day.
    fn now(&self) -> NaiveTime;
}

#[cfg(test)]
#[allow(dead_code)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// Clock that only moves when told to.
    pub struct ManualClock {
        time: Mutex<NaiveTime>,
    }

    impl ManualClock {
        pub fn at(hour: u32, minute: u32, second: u32) -> Self {
            Self {
                time: Mutex::new(
                    NaiveTime::from_hms_opt(hour, minute, second).expect("valid test time"),
                ),
            }
        }

        pub fn set(&self, hour: u32, minute: u32, second: u32) {
            *self.time.lock() =
                NaiveTime::from_hms_opt(hour, minute, second).expect("valid test time");
        }

        pub fn advance_secs(&self, secs: i64) {
            let mut time = self.time.lock();
            *time = time.overflowing_add_signed(chrono::TimeDelta::seconds(secs)).0;
        }
    }

    impl ClockPort for ManualClock {
        fn now(&self) -> NaiveTime {
            *self.time.lock()
        }
    }
}
