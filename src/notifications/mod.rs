//! Bounded log of footer status messages.

use std::collections::VecDeque;

use crate::constants::NOTIFICATION_CAPACITY;
use crate::error::DashboardError;
use crate::models::{Notification, Severity};

/// Keeps the newest few notifications, dropping the oldest first.
#[derive(Debug)]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
    capacity: usize,
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::new(NOTIFICATION_CAPACITY)
    }
}

impl NotificationLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, message: &str, severity: Severity) {
        self.entries.push_back(Notification::new(message, severity));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn info(&mut self, message: &str) {
        self.push(message, Severity::Info);
    }

    pub fn success(&mut self, message: &str) {
        self.push(message, Severity::Success);
    }

    pub fn error(&mut self, message: &str) {
        self.push(message, Severity::Error);
    }

    /// Surface an error to the user.
    pub fn report(&mut self, err: &DashboardError) {
        tracing::warn!("{}", err);
        self.error(&err.to_string());
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    /// Empty the log, leaving only the confirmation of the clear.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.success("Notifications cleared");
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_at_five_oldest_first() {
        let mut log = NotificationLog::default();
        for i in 0..12 {
            log.info(&format!("msg {}", i));
            assert!(log.len() <= NOTIFICATION_CAPACITY);
        }
        let messages: Vec<&str> = log.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["msg 7", "msg 8", "msg 9", "msg 10", "msg 11"]);
    }

    #[test]
    fn latest_is_newest() {
        let mut log = NotificationLog::default();
        assert!(log.latest().is_none());
        log.info("first");
        log.error("second");
        let latest = log.latest().unwrap();
        assert_eq!(latest.message, "second");
        assert_eq!(latest.severity, Severity::Error);
    }

    #[test]
    fn clear_leaves_confirmation() {
        let mut log = NotificationLog::default();
        log.info("a");
        log.info("b");
        log.clear();
        assert_eq!(log.len(), 1);
        let n = log.latest().unwrap();
        assert_eq!(n.message, "Notifications cleared");
        assert_eq!(n.severity, Severity::Success);
    }

    #[test]
    fn report_uses_error_severity() {
        let mut log = NotificationLog::default();
        log.report(&DashboardError::index(98));
        let n = log.latest().unwrap();
        assert_eq!(n.severity, Severity::Error);
        assert!(n.message.contains("99"));
    }

    #[test]
    fn time_label_format() {
        let mut log = NotificationLog::default();
        log.success("ok");
        let label = log.latest().unwrap().time_label();
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
    }
}
