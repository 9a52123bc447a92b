//! Completion watcher.
//!
//! A worker exiting and its artifact becoming visible are separate events,
//! so the orchestrator polls for the artifact within a fixed budget.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use crate::artifact::{ArtifactError, ArtifactName, ArtifactStore};
use crate::metrics;

/// Polling cadence and total wait budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Delay between existence checks (milliseconds).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Total time to wait for the artifact (milliseconds).
    #[serde(default = "default_budget")]
    pub budget_ms: u64,
}

fn default_poll_interval() -> u64 {
    500
}

fn default_budget() -> u64 {
    5000
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            budget_ms: default_budget(),
        }
    }
}

/// The artifact did not show up in time.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{artifact} not observed within {budget:?}")]
pub struct WatchTimeout {
    pub artifact: String,
    pub budget: Duration,
}

/// Why waiting for an artifact ended without it.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Timeout(#[from] WatchTimeout),

    /// The store could not tell whether the artifact exists.
    #[error(transparent)]
    Storage(#[from] ArtifactError),
}

/// Waits for artifacts to appear.
#[derive(Debug, Clone)]
pub struct CompletionWatcher {
    interval: Duration,
    budget: Duration,
}

impl CompletionWatcher {
    pub fn new(interval: Duration, budget: Duration) -> Self {
        Self { interval, budget }
    }

    pub fn from_config(config: &WatcherConfig) -> Self {
        Self::new(
            Duration::from_millis(config.poll_interval_ms),
            Duration::from_millis(config.budget_ms),
        )
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Returns once `artifact` exists, or times out when the budget is spent.
    /// A failed existence check ends the wait immediately.
    ///
    /// Existence is the only signal; writers publish with a rename so a
    /// visible artifact is complete. The last sleep is clamped to the
    /// remaining budget and followed by one final check at the deadline.
    pub async fn wait_for(
        &self,
        store: &dyn ArtifactStore,
        artifact: &ArtifactName,
    ) -> Result<Duration, WatchError> {
        let start = Instant::now();
        let mut polls = 0u32;

        loop {
            polls += 1;
            metrics::WATCHER_POLLS.inc();

            if store.exists(artifact).await? {
                let waited = start.elapsed();
                debug!("{} observed after {:?} ({} polls)", artifact, waited, polls);
                return Ok(waited);
            }

            let elapsed = start.elapsed();
            if elapsed >= self.budget {
                debug!("{} not observed after {} polls", artifact, polls);
                return Err(WatchTimeout {
                    artifact: artifact.to_string(),
                    budget: self.budget,
                }
                .into());
            }

            tokio::time::sleep(self.interval.min(self.budget - elapsed)).await;
        }
    }
}

impl Default for CompletionWatcher {
    fn default() -> Self {
        Self::from_config(&WatcherConfig::default())
    }
}
