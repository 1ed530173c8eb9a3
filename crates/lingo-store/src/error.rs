//! Record store errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::RecordKind;

/// Result type alias for record store operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for record store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No record of the requested kind exists.
    #[error("no {kind} records found")]
    Empty { kind: RecordKind },

    /// The named record does not exist.
    #[error("record '{name}' not found in {kind} records")]
    NotFound { kind: RecordKind, name: String },

    /// The name is not a plain file name.
    #[error("invalid record name '{0}'")]
    InvalidName(String),

    /// Filesystem access failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stored file is not valid JSON.
    #[error("record {} is not valid JSON: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be serialized.
    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` when the failure means "nothing to return" rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Empty { .. } | Self::NotFound { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
