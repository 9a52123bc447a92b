//! Mock fetch worker for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::artifact::write_result_atomically;
use crate::place::{Category, FetchRequest, FetchResult};
use crate::worker::{FetchWorker, WorkerError, WorkerOutput};

/// What the mock does when invoked for a category.
#[derive(Debug, Clone)]
pub enum WorkerScript {
    /// Write the result and exit successfully.
    Result(FetchResult),
    /// Exit successfully, write the result `after` the exit.
    DelayedResult { result: FetchResult, after: Duration },
    /// Write arbitrary bytes as the artifact.
    Raw(String),
    /// Exit with a failure and a diagnostic.
    Fail { exit_code: i32, diagnostic: String },
    /// Exit successfully without writing anything.
    Silent,
}

/// A recorded invocation for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedInvocation {
    pub latitude: f64,
    pub longitude: f64,
    pub category: Category,
    /// Artifact path the worker was told to write.
    pub output: PathBuf,
}

/// Mock implementation of the FetchWorker trait.
///
/// Behavior is scripted per category. Categories without a script get an
/// empty result list.
///
/// # Example
///
/// ```rust,ignore
/// use nearby_core::testing::{fixtures, MockFetchWorker};
///
/// let worker = MockFetchWorker::new();
/// worker.set_result("restaurant", fixtures::places("Diner", 5)).await;
/// worker.set_failure("hotel", 1, "Error: SERPAPI_KEY not found").await;
///
/// // Use in a FetchOrchestrator...
///
/// assert_eq!(worker.invocation_count().await, 2);
/// ```
#[derive(Debug, Default)]
pub struct MockFetchWorker {
    scripts: Arc<RwLock<HashMap<String, WorkerScript>>>,
    invocations: Arc<RwLock<Vec<RecordedInvocation>>>,
    /// Simulated run time before the worker "exits".
    run_time: Arc<RwLock<Duration>>,
}

impl MockFetchWorker {
    /// Create a new mock worker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the behavior for a category.
    pub async fn set_script(&self, category: &str, script: WorkerScript) {
        self.scripts
            .write()
            .await
            .insert(category.to_string(), script);
    }

    pub async fn set_result(&self, category: &str, result: FetchResult) {
        self.set_script(category, WorkerScript::Result(result)).await;
    }

    pub async fn set_delayed_result(&self, category: &str, result: FetchResult, after: Duration) {
        self.set_script(category, WorkerScript::DelayedResult { result, after })
            .await;
    }

    pub async fn set_raw_output(&self, category: &str, content: &str) {
        self.set_script(category, WorkerScript::Raw(content.to_string()))
            .await;
    }

    pub async fn set_failure(&self, category: &str, exit_code: i32, diagnostic: &str) {
        self.set_script(
            category,
            WorkerScript::Fail {
                exit_code,
                diagnostic: diagnostic.to_string(),
            },
        )
        .await;
    }

    pub async fn set_silent(&self, category: &str) {
        self.set_script(category, WorkerScript::Silent).await;
    }

    /// Set how long each invocation takes before returning.
    pub async fn set_run_time(&self, run_time: Duration) {
        *self.run_time.write().await = run_time;
    }

    /// Get all recorded invocations.
    pub async fn invocations(&self) -> Vec<RecordedInvocation> {
        self.invocations.read().await.clone()
    }

    /// Get the number of invocations performed.
    pub async fn invocation_count(&self) -> usize {
        self.invocations.read().await.len()
    }

    /// Clear recorded invocations.
    pub async fn clear_invocations(&self) {
        self.invocations.write().await.clear();
    }
}

async fn write_raw(path: &Path, content: &str) -> Result<(), std::io::Error> {
    let temp = path.with_extension("mock.tmp");
    tokio::fs::write(&temp, content).await?;
    tokio::fs::rename(&temp, path).await
}

fn output_error(err: impl ToString) -> WorkerError {
    WorkerError::failed(Some(1), err.to_string())
}

#[async_trait]
impl FetchWorker for MockFetchWorker {
    fn name(&self) -> &str {
        "mock"
    }

    async fn invoke(
        &self,
        request: &FetchRequest,
        output: &Path,
    ) -> Result<WorkerOutput, WorkerError> {
        self.invocations.write().await.push(RecordedInvocation {
            latitude: request.latitude(),
            longitude: request.longitude(),
            category: request.category().clone(),
            output: output.to_path_buf(),
        });

        let run_time = *self.run_time.read().await;
        if !run_time.is_zero() {
            tokio::time::sleep(run_time).await;
        }

        let script = self
            .scripts
            .read()
            .await
            .get(request.category().as_str())
            .cloned()
            .unwrap_or(WorkerScript::Result(FetchResult::default()));

        match script {
            WorkerScript::Result(result) => {
                write_result_atomically(output, &result)
                    .await
                    .map_err(output_error)?;
            }
            WorkerScript::DelayedResult { result, after } => {
                let output = output.to_path_buf();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = write_result_atomically(&output, &result).await;
                });
            }
            WorkerScript::Raw(content) => {
                write_raw(output, &content).await.map_err(output_error)?;
            }
            WorkerScript::Fail {
                exit_code,
                diagnostic,
            } => {
                return Err(WorkerError::failed(Some(exit_code), diagnostic));
            }
            WorkerScript::Silent => {}
        }

        Ok(WorkerOutput {
            exit_code: Some(0),
            duration_ms: run_time.as_millis() as u64,
            ..Default::default()
        })
    }
}
