use crate::domain::entities::Sound;

/// Port for desktop notifications.
pub trait NotificationPort: Send + Sync {
    /// Shows a desktop notification, hinting the host sound theme with `sound`.
    fn send(&self, title: &str, body: &str, sound: Sound);
}
