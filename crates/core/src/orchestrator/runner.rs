//! Fetch orchestrator implementation.
//!
//! Drives fetch jobs through the worker → watcher → artifact handoff:
//! - Location search: sequential, one job per configured category, each
//!   published under its durable artifact name
//! - Single fetch: one job, result read straight from its scratch artifact

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::aggregate::CategoryResults;
use crate::artifact::{ArtifactError, ArtifactName, ArtifactStore};
use crate::metrics;
use crate::place::{Category, FetchRequest, FetchResult};
use crate::watcher::{CompletionWatcher, WatchError};
use crate::worker::{FetchWorker, WorkerError};

use super::config::SearchConfig;
use super::error::FetchError;
use super::job::{FetchJob, JobState};

/// Coordinates fetch workers and the artifact store for incoming requests.
pub struct FetchOrchestrator {
    config: SearchConfig,
    store: Arc<dyn ArtifactStore>,
    worker: Arc<dyn FetchWorker>,
    watcher: CompletionWatcher,
}

impl FetchOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        config: SearchConfig,
        store: Arc<dyn ArtifactStore>,
        worker: Arc<dyn FetchWorker>,
        watcher: CompletionWatcher,
    ) -> Self {
        debug!(
            "Orchestrator using {} worker, {} store, poll {:?} / budget {:?}",
            worker.name(),
            store.name(),
            watcher.interval(),
            watcher.budget()
        );
        Self {
            config,
            store,
            worker,
            watcher,
        }
    }

    /// Categories covered by [`search_location`](Self::search_location).
    pub fn categories(&self) -> Vec<Category> {
        self.config.categories()
    }

    /// Search term for on-demand fetches that name none.
    pub fn default_category(&self) -> Category {
        self.config.default_category()
    }

    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    /// Fetch every configured category for a location.
    pub async fn search_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CategoryResults, FetchError> {
        let categories = self.categories();
        self.fetch_categories(latitude, longitude, &categories)
            .await
    }

    /// Fetch `categories` in order and publish each under its durable name.
    ///
    /// Stops at the first failure. Categories already published keep their
    /// new artifacts; the rest keep whatever they had before.
    pub async fn fetch_categories(
        &self,
        latitude: f64,
        longitude: f64,
        categories: &[Category],
    ) -> Result<CategoryResults, FetchError> {
        let mut results = CategoryResults::new();

        for category in categories {
            let request = FetchRequest::new(latitude, longitude, category.clone())?;
            let durable = ArtifactName::durable(category).map_err(FetchError::Storage)?;

            match self.fetch_and_publish(request, &durable).await {
                Ok(result) => results.push(category.clone(), result),
                Err(e) => {
                    let completed: Vec<&str> =
                        results.categories().map(Category::as_str).collect();
                    warn!(
                        "Location search aborted at {} (completed: {:?}): {}",
                        category, completed, e
                    );
                    return Err(e);
                }
            }
        }

        info!(
            "Location search at ({}, {}) completed for {} categories",
            latitude,
            longitude,
            results.len()
        );
        Ok(results)
    }

    /// Run one job and return its result without publishing it.
    pub async fn fetch_single(&self, request: FetchRequest) -> Result<FetchResult, FetchError> {
        let start = Instant::now();
        let mut job = FetchJob::new(request);

        let outcome = match self.run_job(&mut job).await {
            Ok(()) => self.store.read(job.scratch()).await.map_err(FetchError::from),
            Err(e) => Err(e),
        };

        self.discard_scratch(&job).await;
        self.finish(&mut job, &outcome, start);
        outcome
    }

    /// Read the latest published results of a category.
    pub async fn read_category(&self, category: &Category) -> Result<FetchResult, FetchError> {
        let durable = ArtifactName::durable(category).map_err(FetchError::Storage)?;

        self.store.read(&durable).await.map_err(|e| match e {
            ArtifactError::NotFound { name } => FetchError::NotFound {
                category: category.to_string(),
                artifact: name,
            },
            other => FetchError::from(other),
        })
    }

    /// Job steps (a)–(e) for one category of a location search.
    async fn fetch_and_publish(
        &self,
        request: FetchRequest,
        durable: &ArtifactName,
    ) -> Result<FetchResult, FetchError> {
        let start = Instant::now();
        let mut job = FetchJob::new(request);

        let outcome = async {
            self.store.delete(job.scratch()).await?;
            self.run_job(&mut job).await?;
            self.store.rename(job.scratch(), durable).await?;
            let result = self.store.read(durable).await?;
            Ok::<FetchResult, FetchError>(result)
        }
        .await;

        if outcome.is_err() {
            self.discard_scratch(&job).await;
        }
        self.finish(&mut job, &outcome, start);
        outcome
    }

    /// Invoke the worker and wait for its scratch artifact.
    async fn run_job(&self, job: &mut FetchJob) -> Result<(), FetchError> {
        let category = job.request().category().to_string();
        info!(
            "Fetching {} near ({}, {}) [job {}]",
            category,
            job.request().latitude(),
            job.request().longitude(),
            job.id()
        );

        job.transition(JobState::Invoking);
        let output = self.store.location(job.scratch());
        self.worker
            .invoke(job.request(), &output)
            .await
            .map_err(|e| {
                let exit_code = match &e {
                    WorkerError::Failed { exit_code, .. } => *exit_code,
                    WorkerError::Launch { .. } => None,
                };
                FetchError::WorkerFailure {
                    category: category.clone(),
                    exit_code,
                    diagnostic: e.diagnostic(),
                }
            })?;

        job.transition(JobState::AwaitingArtifact);
        self.watcher
            .wait_for(self.store.as_ref(), job.scratch())
            .await
            .map_err(|e| match e {
                WatchError::Timeout(t) => FetchError::Timeout {
                    category,
                    artifact: t.artifact,
                    budget: t.budget,
                },
                WatchError::Storage(e) => FetchError::Storage(e),
            })?;

        Ok(())
    }

    /// Records the terminal state of a job.
    fn finish(
        &self,
        job: &mut FetchJob,
        outcome: &Result<FetchResult, FetchError>,
        start: Instant,
    ) {
        let state = match outcome {
            Ok(_) => JobState::Succeeded,
            Err(e) => e.job_state(),
        };
        job.transition(state);

        let elapsed = start.elapsed();
        let category = job.request().category();
        let category_label = if self.config.is_configured(category) {
            category.as_str()
        } else {
            metrics::QUERY_CATEGORY
        };
        metrics::record_fetch_job(category_label, state.as_str(), elapsed.as_secs_f64());

        match outcome {
            Ok(result) => info!(
                "Job {} ({}) {} with {} places in {:?}",
                job.id(),
                job.request().category(),
                state,
                result.len(),
                elapsed
            ),
            Err(e) => warn!(
                "Job {} ({}) {} after {:?}: {}",
                job.id(),
                job.request().category(),
                state,
                elapsed,
                e
            ),
        }
    }

    /// Best-effort removal of a job's scratch artifact.
    async fn discard_scratch(&self, job: &FetchJob) {
        if let Err(e) = self.store.delete(job.scratch()).await {
            warn!("Failed to remove scratch artifact {}: {}", job.scratch(), e);
        }
    }
}
