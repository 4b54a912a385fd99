//! Transient user-facing notifications (toasts on mobile).

use std::sync::{Arc, Mutex};

/// User-visible texts emitted by the verification flow.
pub mod messages {
    pub const SELFIE_CAPTURED: &str = "Selfie captured!";
    pub const DOCUMENT_SELECTED: &str = "Document selected!";
    pub const MISSING_MEDIA: &str = "Please add selfie & document";
    pub const VERIFIED: &str = "Verification Successful!";
    pub const FAILED: &str = "Verification Failed";
    pub const CAMERA_UNAVAILABLE: &str = "Camera unavailable";
    pub const PICKER_UNAVAILABLE: &str = "Could not open photo library";
    pub const DOCUMENT_ISSUE_PREFIX: &str = "Doc: ";
    pub const SELFIE_ISSUE_PREFIX: &str = "Selfie: ";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, text: text.into() }
    }
}

/// Sink for notifications; the presentation layer decides how to render.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Buffers notifications until the host drains them.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything emitted so far, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(mut entries) => std::mem::take(&mut *entries),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        tracing::debug!(level = ?notification.level, text = %notification.text, "notification");
        match self.entries.lock() {
            Ok(mut entries) => entries.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

/// One info notification per quality issue: document issues first, then
/// selfie issues, each prefixed so the user can tell them apart.
pub fn feedback_notifications(document_issues: &[String], selfie_issues: &[String]) -> Vec<Notification> {
    let docs = document_issues
        .iter()
        .map(|m| Notification::info(format!("{}{}", messages::DOCUMENT_ISSUE_PREFIX, m)));
    let selfies = selfie_issues
        .iter()
        .map(|m| Notification::info(format!("{}{}", messages::SELFIE_ISSUE_PREFIX, m)));
    docs.chain(selfies).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_is_ordered_and_prefixed() {
        let out = feedback_notifications(
            &["Image appears blurry".into(), "Image is too dark".into()],
            &["Image is too dark".into()],
        );
        let texts: Vec<_> = out.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(
            texts,
            ["Doc: Image appears blurry", "Doc: Image is too dark", "Selfie: Image is too dark"]
        );
        assert!(out.iter().all(|n| n.level == NotificationLevel::Info));
    }

    #[test]
    fn log_drain_empties_buffer() {
        let log = NotificationLog::new();
        log.notify(Notification::success("a"));
        log.notify(Notification::error("b"));
        assert_eq!(log.snapshot().len(), 2);
        assert_eq!(log.drain().len(), 2);
        assert!(log.drain().is_empty());
    }
}
