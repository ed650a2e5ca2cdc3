//! Notification capability for the client.
//!
//! The core never presents anything; hosts inject a `Notifier` and decide
//! how (or whether) to surface messages.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Host-provided sink for user-facing messages.
pub trait Notifier {
    fn notify(&mut self, level: NotificationLevel, message: String);
}

/// Notifier that drops everything. Useful for headless hosts.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _level: NotificationLevel, _message: String) {}
}

/// Notifier that records messages in memory, newest last.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub notifications: Vec<Notification>,
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, level: NotificationLevel, message: String) {
        self.notifications.push(Notification::new(level, message));
    }
}
