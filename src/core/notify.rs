//! User-visible, non-blocking notifications

use std::sync::Mutex;

/// Receives failures that should be shown to the user without interrupting
/// the session.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, title: &str, description: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, title: &str, description: &str) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(Notification {
                title: title.to_string(),
                description: description.to_string(),
            });
        }
    }
}
