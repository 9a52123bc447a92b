//! Trait definitions for the artifact store.

use async_trait::async_trait;
use std::path::PathBuf;

use super::{ArtifactError, ArtifactName};
use crate::place::FetchResult;

/// Durable storage for fetch results.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Returns the name of this store implementation.
    fn name(&self) -> &str;

    /// Where an artifact lives, handed to workers that write it themselves.
    fn location(&self, artifact: &ArtifactName) -> PathBuf;

    /// Writes an artifact so readers see either nothing or the whole content.
    async fn write(&self, artifact: &ArtifactName, result: &FetchResult)
        -> Result<(), ArtifactError>;

    /// Reads and parses an artifact.
    async fn read(&self, artifact: &ArtifactName) -> Result<FetchResult, ArtifactError>;

    /// Atomically publishes `from` under `to`, replacing any previous content.
    async fn rename(&self, from: &ArtifactName, to: &ArtifactName) -> Result<(), ArtifactError>;

    /// Whether the artifact is currently visible.
    ///
    /// Fails when visibility cannot be determined, e.g. the directory is
    /// unreadable.
    async fn exists(&self, artifact: &ArtifactName) -> Result<bool, ArtifactError>;

    /// Removes an artifact. Removing a missing artifact succeeds.
    async fn delete(&self, artifact: &ArtifactName) -> Result<(), ArtifactError>;
}
