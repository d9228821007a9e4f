//! Audio playback port definition.

use crate::domain::entities::Sound;
use crate::domain::errors::AudioError;

/// Port for sound playback.
///
/// Every call is fire-and-forget. An `Err` means the request was rejected up
/// front; failures during playback are reported by the adapter itself.
#[cfg_attr(test, mockall::automock)]
pub trait AudioPort: Send + Sync {
    /// Starts looping a sound on the ringing channel, replacing any current loop.
    ///
    /// # Errors
    /// Returns `AudioError` if playback cannot be started.
    fn play_looped(&self, sound: Sound) -> Result<(), AudioError>;

    /// Stops the ringing channel.
    fn stop_looped(&self);

    /// Plays a sound for a short fixed window on the preview channel.
    ///
    /// # Errors
    /// Returns `AudioError` if playback cannot be started.
    fn preview(&self, sound: Sound) -> Result<(), AudioError>;

    /// Plays a sound once.
    ///
    /// # Errors
    /// Returns `AudioError` if playback cannot be started.
    fn play_once(&self, sound: Sound) -> Result<(), AudioError>;

    /// Stops every channel.
    fn stop_all(&self);
}
