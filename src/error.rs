//! Error taxonomy for the interactive core.
//!
//! None of these are fatal: every one is turned into an `error` notification
//! by [`crate::notifications::NotificationLog::report`] and the loop goes on.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// A persisted file exists but could not be decoded.
    #[error("Error loading {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing a persisted file failed.
    #[error("Error {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A 1-based task position outside the current list.
    #[error("Invalid todo index: {position}")]
    Index { position: usize },

    /// A command line that does not match the grammar or has bad arguments.
    #[error("{0}")]
    Validation(String),

    /// The weather or metrics collaborator failed.
    #[error("{0}")]
    ExternalService(String),
}

impl DashboardError {
    /// `action` reads as a gerund: "reading", "saving".
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Out-of-range error for a 0-based storage index.
    pub fn index(index: usize) -> Self {
        Self::Index { position: index + 1 }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
