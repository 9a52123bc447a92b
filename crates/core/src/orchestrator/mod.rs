//! Fetch orchestrator.
//!
//! Runs fetch jobs against an out-of-process worker and hands results back
//! through the artifact store:
//! - **Location search**: sequential, one job per configured category,
//!   results published under per-category durable names
//! - **Single fetch**: one job, result read from its own scratch artifact
//! - **Category read**: latest durable results, no worker involved

mod config;
mod error;
mod job;
mod runner;

pub use config::SearchConfig;
pub use error::FetchError;
pub use job::{FetchJob, JobState};
pub use runner::FetchOrchestrator;
