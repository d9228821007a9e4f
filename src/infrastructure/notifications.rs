//! Desktop notifications with conditional compilation.

use crate::domain::entities::Sound;
use crate::domain::ports::NotificationPort;

#[cfg(feature = "notify")]
mod notify_impl {
    use super::*;
    use notify_rust::{Notification, Timeout};

    /// Desktop notification service.
    #[derive(Debug, Clone, Default)]
    pub struct DesktopNotificationService {
        enabled: bool,
    }

    impl DesktopNotificationService {
        #[must_use]
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }
    }

    impl NotificationPort for DesktopNotificationService {
        fn send(&self, title: &str, body: &str, sound: Sound) {
            if !self.enabled {
                return;
            }

            let title = title.to_string();
            let body = body.to_string();

            tokio::task::spawn_blocking(move || {
                if let Err(e) = Notification::new()
                    .summary(&title)
                    .body(&body)
                    .appname(crate::NAME)
                    .icon("alarm-clock")
                    .sound_name(sound.asset().theme_name)
                    .timeout(Timeout::Milliseconds(10_000))
                    .show()
                {
                    tracing::warn!("Failed to show notification: {}", e);
                }
            });
        }
    }
}

#[cfg(not(feature = "notify"))]
mod stub_impl {
    use super::*;

    /// Desktop notification service; a no-op without the `notify` feature.
    #[derive(Debug, Clone, Default)]
    pub struct DesktopNotificationService;

    impl DesktopNotificationService {
        #[must_use]
        pub fn new(_enabled: bool) -> Self {
            Self
        }
    }

    impl NotificationPort for DesktopNotificationService {
        fn send(&self, _title: &str, _body: &str, _sound: Sound) {}
    }
}

#[cfg(feature = "notify")]
pub use notify_impl::DesktopNotificationService;
#[cfg(not(feature = "notify"))]
pub use stub_impl::DesktopNotificationService;
