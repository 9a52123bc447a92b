//! Trait definitions for fetch workers.

use async_trait::async_trait;
use std::path::Path;

use super::{WorkerError, WorkerOutput};
use crate::place::FetchRequest;

/// Runs one isolated fetch and reports how it ended.
///
/// Returning does not mean the output artifact is visible yet; callers wait
/// for it separately. No timeout is applied here.
#[async_trait]
pub trait FetchWorker: Send + Sync {
    /// Returns the name of this worker implementation.
    fn name(&self) -> &str;

    /// Runs the worker for `request`, asking it to write its result to `output`.
    async fn invoke(&self, request: &FetchRequest, output: &Path)
        -> Result<WorkerOutput, WorkerError>;
}
