//! Domain error types.

mod alarm_input_error;
mod audio_error;
mod settings_error;

pub use alarm_input_error::AlarmInputError;
pub use audio_error::AudioError;
pub use settings_error::SettingsError;
