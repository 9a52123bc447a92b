//! Error types for the artifact store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or publishing artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Artifact name is not a plain file name.
    #[error("Invalid artifact name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// Artifact does not exist.
    #[error("{name} not found")]
    NotFound { name: String },

    /// Artifact exists but does not hold a list of places.
    #[error("Invalid JSON in {name}: {reason}")]
    Parse { name: String, reason: String },

    /// Publishing rename failed.
    #[error("Failed to rename {from} to {to}: {source}")]
    RenameFailed {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    /// Any other filesystem failure.
    #[error("Failed to {operation} {path}: {source}")]
    Storage {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    /// Creates a storage error for the given operation.
    pub fn storage(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether the artifact simply has not been produced yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
