//! Error taxonomy for storage.json access

use std::io;
use std::path::PathBuf;

/// Failures while reading or rewriting the telemetry configuration
///
/// Process lookups that find nothing or lack privilege are not errors; see
/// [`crate::cursor::process::ProcessScan`] and
/// [`crate::cursor::process::TerminateOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    /// The file is missing, unreadable, or not a JSON object
    #[error("config unavailable at {}: {reason}", .path.display())]
    ConfigUnavailable { path: PathBuf, reason: String },

    /// Writing the backup or the updated file failed
    #[error("failed to write {}", .path.display())]
    ConfigWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResetError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ResetError::ConfigUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ResetError::ConfigWriteFailed {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResetError>;
