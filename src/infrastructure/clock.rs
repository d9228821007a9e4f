//! Host wall clock.

use chrono::{Local, NaiveTime};

use crate::domain::ports::ClockPort;

/// Reads host-local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}
