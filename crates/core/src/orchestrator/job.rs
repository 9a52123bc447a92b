//! Per-job state machine.

use std::fmt;

use tracing::debug;
use uuid::Uuid;

use crate::artifact::ArtifactName;
use crate::place::FetchRequest;

/// Lifecycle of one fetch job.
///
/// `Idle → Invoking → AwaitingArtifact → Succeeded`, or one of the failure
/// states from any non-terminal state. `Rejected` marks a request refused
/// before any worker ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Invoking,
    AwaitingArtifact,
    Succeeded,
    TimedOut,
    WorkerFailed,
    ParseFailed,
    StorageFailed,
    Rejected,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Invoking => "invoking",
            Self::AwaitingArtifact => "awaiting_artifact",
            Self::Succeeded => "succeeded",
            Self::TimedOut => "timed_out",
            Self::WorkerFailed => "worker_failed",
            Self::ParseFailed => "parse_failed",
            Self::StorageFailed => "storage_failed",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Idle | Self::Invoking | Self::AwaitingArtifact)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One worker run and the scratch artifact it owns.
#[derive(Debug, Clone)]
pub struct FetchJob {
    id: Uuid,
    request: FetchRequest,
    scratch: ArtifactName,
    state: JobState,
}

impl FetchJob {
    /// Creates a job with a fresh id and its own scratch artifact.
    pub fn new(request: FetchRequest) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            scratch: ArtifactName::scratch(&id),
            request,
            state: JobState::Idle,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn request(&self) -> &FetchRequest {
        &self.request
    }

    pub fn scratch(&self) -> &ArtifactName {
        &self.scratch
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Moves to `next`. Terminal states are final.
    pub fn transition(&mut self, next: JobState) {
        if self.state.is_terminal() {
            debug!(
                "Job {} already {}, ignoring transition to {}",
                self.id, self.state, next
            );
            return;
        }
        debug!("Job {} ({}): {} -> {}", self.id, self.request.category(), self.state, next);
        self.state = next;
    }
}
