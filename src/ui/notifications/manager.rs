// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! Every pushed toast is kept until it expires or is dismissed. There is no
//! limit on how many coexist and no deduplication.

use super::notification::{Notification, NotificationId, Phase};
use std::time::Instant;

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
}

/// Holds the notifications currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct Manager {
    notifications: Vec<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification; it shows up after the entry delay.
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(
            key = notification.message_key(),
            severity = ?notification.severity(),
            "toast"
        );
        self.notifications.push(notification);
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if the notification was found and removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.notifications.iter().position(|n| n.id() == id) {
            self.notifications.remove(pos);
            return true;
        }
        false
    }

    /// Removes every notification that has expired at `now`.
    pub fn tick_at(&mut self, now: Instant) {
        self.notifications
            .retain(|n| n.phase_at(now) != Phase::Expired);
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
        }
    }

    /// Notifications in display order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::{TOAST_DETACH_DELAY_MS, TOAST_LIFETIME_MS};
    use std::time::Duration;

    #[test]
    fn new_manager_is_empty() {
        let manager = Manager::new();
        assert_eq!(manager.len(), 0);
        assert!(!manager.has_notifications());
    }

    #[test]
    fn toasts_stack_without_limit_or_deduplication() {
        let mut manager = Manager::new();
        for _ in 0..10 {
            manager.push(Notification::info("same-message"));
        }
        assert_eq!(manager.len(), 10);
    }

    #[test]
    fn newest_toast_is_last() {
        let mut manager = Manager::new();
        manager.push(Notification::info("first"));
        manager.push(Notification::error("second"));

        let keys: Vec<&str> = manager.iter().map(Notification::message_key).collect();
        assert_eq!(keys, vec!["first", "second"]);
    }

    #[test]
    fn dismiss_removes_immediately() {
        let mut manager = Manager::new();
        let notification = Notification::success("test");
        let id = notification.id();
        manager.push(notification);

        manager.handle_message(&Message::Dismiss(id));
        assert_eq!(manager.len(), 0);
    }

    #[test]
    fn dismiss_nonexistent_returns_false() {
        let mut manager = Manager::new();
        let fake_id = Notification::success("temp").id();
        assert!(!manager.dismiss(fake_id));
    }

    #[test]
    fn tick_keeps_hiding_toasts_and_removes_expired_ones() {
        let mut manager = Manager::new();
        let notification = Notification::error("analysis-failed");
        let created = notification.created();
        manager.push(notification);

        manager.tick_at(created + Duration::from_millis(TOAST_LIFETIME_MS + 1));
        assert_eq!(manager.len(), 1);

        manager.tick_at(created + Duration::from_millis(TOAST_LIFETIME_MS + TOAST_DETACH_DELAY_MS));
        assert_eq!(manager.len(), 0);
    }

    #[test]
    fn every_severity_auto_dismisses() {
        let mut manager = Manager::new();
        let start = Instant::now();
        manager.push(Notification::success("a"));
        manager.push(Notification::info("b"));
        manager.push(Notification::warning("c"));
        manager.push(Notification::error("d"));

        manager.tick_at(start + Duration::from_secs(60));
        assert!(!manager.has_notifications());
    }
}
