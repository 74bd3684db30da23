//! Notifications and a minimal translator.

use std::sync::Mutex;
use std::time::Duration;

use crate::services::NotificationSink;
use crate::services::Translator;

/// Default duration for notifications.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(4);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Danger,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: Level,
    /// Display text.
    pub message: String,
    /// How long a host should show it.
    pub duration: Duration,
}

impl Notification {
    /// Create a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    /// Create a danger notification.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: Level::Danger,
            message: message.into(),
            duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    /// Set a custom duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Notification sink that keeps everything it is given.
///
/// Hosts drain it after each interaction to display the messages.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: Mutex<Vec<Notification>>,
    duration: Option<Duration>,
}

impl Notifications {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that stamps every notification with `duration`.
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
            duration: Some(duration),
        }
    }

    /// Take all queued notifications.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }

    /// Snapshot of queued notifications.
    pub fn pending(&self) -> Vec<Notification> {
        self.queue.lock().map(|q| q.clone()).unwrap_or_default()
    }

    fn push(&self, notification: Notification) {
        let notification = match self.duration {
            Some(duration) => notification.with_duration(duration),
            None => notification,
        };
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(notification);
        }
    }
}

impl NotificationSink for Notifications {
    fn success(&self, message: String) {
        self.push(Notification::success(message));
    }

    fn danger(&self, message: String) {
        self.push(Notification::danger(message));
    }
}

/// Translator for hosts without localization: renders `key (count)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str, count: usize) -> String {
        format!("{} ({})", key, count)
    }
}
