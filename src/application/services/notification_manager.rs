use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Notification, NotificationLevel};

/// FIFO of in-app toasts; only the front one is displayed.
#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    default_duration: Duration,
    enabled: bool,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), true)
    }
}

impl NotificationManager {
    #[must_use]
    pub fn new(default_duration: Duration, enabled: bool) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
            enabled,
        }
    }

    pub fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        if !self.enabled {
            return;
        }
        let notification =
            Notification::new(level, title, message).with_duration(self.default_duration);
        self.queue.push_back(notification);
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, title, message);
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, title, message);
    }

    pub fn warn(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Warn, title, message);
    }

    /// Starts the front toast's timer and drops it once expired.
    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.queue.front()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_notification_flow() {
        let mut manager = NotificationManager::default();

        manager.success("Alarm added", "07:00 Wake up");
        assert!(manager.current_notification().is_some());

        manager.tick();
        assert!(manager.has_notifications());
    }

    #[test]
    fn test_queueing() {
        let mut manager = NotificationManager::default();
        manager.info("1", "First");
        manager.warn("2", "Second");

        assert_eq!(manager.current_notification().unwrap().title, "1");

        manager.tick();

        manager.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());

        manager.tick();

        let second = manager.current_notification().unwrap();
        assert_eq!(second.title, "2");
        assert_eq!(second.level, NotificationLevel::Warn);
        assert!(second.displayed_at.unwrap().elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_disabled_manager_drops_everything() {
        let mut manager = NotificationManager::new(Duration::from_secs(5), false);
        manager.info("Focus", "Session complete");
        assert!(!manager.has_notifications());
    }
}
