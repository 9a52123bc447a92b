//! Out-of-process fetch worker.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

use super::{FetchWorker, WorkerConfig, WorkerError, WorkerOutput};
use crate::place::FetchRequest;

/// Environment variable carrying the artifact path to the worker.
pub const OUTPUT_ENV: &str = "NEARBY_OUTPUT";

/// Runs the configured worker program as a child process.
pub struct ProcessWorker {
    config: WorkerConfig,
    env: Vec<(String, String)>,
}

impl ProcessWorker {
    /// Creates a worker runner with the given configuration.
    pub fn new(config: WorkerConfig) -> Self {
        Self {
            config,
            env: Vec::new(),
        }
    }

    /// Adds an environment variable passed to every worker run.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Adds several environment variables.
    pub fn with_envs(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(vars);
        self
    }

    /// Builds the argument list for one run.
    fn build_args(&self, request: &FetchRequest) -> Vec<String> {
        let mut args = self.config.args.clone();
        args.extend([
            request.latitude().to_string(),
            request.longitude().to_string(),
            request.category().to_string(),
        ]);
        args
    }

    /// Picks the text that explains a failed run: stderr, else stdout.
    ///
    /// The chosen stream is returned exactly as captured.
    fn diagnostic(stdout: &str, stderr: &str, exit_code: Option<i32>) -> String {
        if !stderr.trim().is_empty() {
            return stderr.to_string();
        }
        if !stdout.trim().is_empty() {
            return stdout.to_string();
        }
        match exit_code {
            Some(code) => format!("worker exited with code {}", code),
            None => "worker terminated by signal".to_string(),
        }
    }
}

#[async_trait]
impl FetchWorker for ProcessWorker {
    fn name(&self) -> &str {
        "process"
    }

    async fn invoke(
        &self,
        request: &FetchRequest,
        output: &Path,
    ) -> Result<WorkerOutput, WorkerError> {
        let start = Instant::now();
        let args = self.build_args(request);
        debug!("Executing: {:?} {}", self.config.program, args.join(" "));

        let result = Command::new(&self.config.program)
            .args(&args)
            .env(OUTPUT_ENV, output)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| WorkerError::Launch {
                program: self.config.program.clone(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&result.stdout).to_string();
        let stderr = String::from_utf8_lossy(&result.stderr).to_string();
        let exit_code = result.status.code();

        if !stdout.trim().is_empty() {
            debug!("Worker stdout: {}", stdout.trim_end());
        }

        if !result.status.success() {
            return Err(WorkerError::failed(
                exit_code,
                Self::diagnostic(&stdout, &stderr, exit_code),
            ));
        }

        Ok(WorkerOutput {
            exit_code,
            stdout,
            stderr,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
