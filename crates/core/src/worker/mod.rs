//! Fetch worker invocation.
//!
//! A fetch worker is an external program that queries the place-search
//! provider and writes its results to the path in `NEARBY_OUTPUT`. It is
//! called as `<program> [args..] <latitude> <longitude> <category>`, exits
//! zero on success and explains failures on stderr.

mod config;
mod error;
mod process;
mod traits;

pub use config::WorkerConfig;
pub use error::WorkerError;
pub use process::{ProcessWorker, OUTPUT_ENV};
pub use traits::FetchWorker;

/// What a finished worker left behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}
