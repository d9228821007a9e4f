mod audio_port;
mod clock_port;
mod notification_port;

pub use audio_port::AudioPort;
pub use clock_port::ClockPort;
pub use notification_port::NotificationPort;

#[cfg(test)]
pub mod mocks {
    pub use super::audio_port::MockAudioPort;
    pub use super::clock_port::mock::ManualClock;
    pub use super::notification_port::mock::MockNotificationPort;
}
