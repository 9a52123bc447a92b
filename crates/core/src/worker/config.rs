//! Configuration for the fetch worker process.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How to launch the fetch worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Worker executable. Resolved through `PATH` when relative.
    #[serde(default = "default_program")]
    pub program: PathBuf,

    /// Arguments placed before `<latitude> <longitude> <category>`.
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_program() -> PathBuf {
    PathBuf::from("nearby-fetch")
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
        }
    }
}

impl WorkerConfig {
    /// Creates a config for the given program with no leading arguments.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Sets the leading arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}
