use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
    Success,
}

/// A transient status message shown in the footer.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Local>,
}

impl Notification {
    pub fn new(message: &str, severity: Severity) -> Self {
        Self {
            message: message.to_string(),
            severity,
            timestamp: Local::now(),
        }
    }

    /// Wall-clock stamp as rendered in the footer.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}
