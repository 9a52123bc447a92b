//! Error taxonomy for fetch orchestration.

use std::time::Duration;
use thiserror::Error;

use super::JobState;
use crate::artifact::ArtifactError;
use crate::place::RequestError;

/// Why a fetch request failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Missing or malformed coordinates or query.
    #[error(transparent)]
    Validation(#[from] RequestError),

    /// The worker exited abnormally; its diagnostic is kept verbatim.
    #[error("Error fetching {category}: {diagnostic}")]
    WorkerFailure {
        category: String,
        exit_code: Option<i32>,
        diagnostic: String,
    },

    /// The worker's artifact never appeared.
    #[error("{artifact} not found after fetching {category}")]
    Timeout {
        category: String,
        artifact: String,
        budget: Duration,
    },

    /// The artifact is not a valid list of places.
    #[error("Invalid JSON in {artifact}: {reason}")]
    Parse { artifact: String, reason: String },

    /// A durable artifact was requested before any fetch produced it.
    #[error("No {category} results available yet ({artifact} not found)")]
    NotFound { category: String, artifact: String },

    /// Rename, read or delete failed on the artifact store.
    #[error(transparent)]
    Storage(ArtifactError),
}

impl FetchError {
    /// Terminal job state this error corresponds to.
    pub fn job_state(&self) -> JobState {
        match self {
            Self::WorkerFailure { .. } => JobState::WorkerFailed,
            Self::Timeout { .. } => JobState::TimedOut,
            Self::Parse { .. } => JobState::ParseFailed,
            Self::Storage(_) => JobState::StorageFailed,
            Self::Validation(_) | Self::NotFound { .. } => JobState::Rejected,
        }
    }

    /// Whether the client sent bad input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ArtifactError> for FetchError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::Parse { name, reason } => Self::Parse {
                artifact: name,
                reason,
            },
            other => Self::Storage(other),
        }
    }
}
