//! Error types for worker invocation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a fetch worker.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker program could not be started.
    #[error("Failed to launch worker {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The worker ran and reported failure.
    #[error("{diagnostic}")]
    Failed {
        exit_code: Option<i32>,
        diagnostic: String,
    },
}

impl WorkerError {
    /// Creates a failure from the worker's exit code and captured output.
    pub fn failed(exit_code: Option<i32>, diagnostic: impl Into<String>) -> Self {
        Self::Failed {
            exit_code,
            diagnostic: diagnostic.into(),
        }
    }

    /// The text shown to clients.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Failed { diagnostic, .. } => diagnostic.clone(),
            other => other.to_string(),
        }
    }
}
