//! File system artifact store.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::{ArtifactError, ArtifactName, ArtifactStore};
use crate::place::FetchResult;

/// Stores artifacts as JSON files under a single directory.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    /// Creates a store rooted at `root` without touching the file system.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the store, making sure its directory exists.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, ArtifactError> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root)
            .await
            .map_err(|e| ArtifactError::storage("create", &store.root, e))?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Serializes `result` to `path` through a sibling temporary file.
///
/// The temporary file is flushed to disk before it is renamed over `path`.
pub async fn write_result_atomically(path: &Path, result: &FetchResult) -> Result<(), ArtifactError> {
    let bytes = serde_json::to_vec_pretty(result).map_err(|e| ArtifactError::Parse {
        name: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "artifact".to_string());
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    let write = async {
        let mut file = File::create(&temp_path).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        Ok::<(), std::io::Error>(())
    };

    if let Err(e) = write.await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(ArtifactError::storage("write", &temp_path, e));
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(ArtifactError::storage("publish", path, e));
    }

    Ok(())
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    fn name(&self) -> &str {
        "fs"
    }

    fn location(&self, artifact: &ArtifactName) -> PathBuf {
        self.root.join(artifact.as_str())
    }

    async fn write(
        &self,
        artifact: &ArtifactName,
        result: &FetchResult,
    ) -> Result<(), ArtifactError> {
        write_result_atomically(&self.location(artifact), result).await
    }

    async fn read(&self, artifact: &ArtifactName) -> Result<FetchResult, ArtifactError> {
        let path = self.location(artifact);
        let bytes = fs::read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ArtifactError::NotFound {
                    name: artifact.to_string(),
                }
            } else {
                ArtifactError::storage("read", &path, e)
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Parse {
            name: artifact.to_string(),
            reason: e.to_string(),
        })
    }

    async fn rename(&self, from: &ArtifactName, to: &ArtifactName) -> Result<(), ArtifactError> {
        fs::rename(self.location(from), self.location(to))
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ArtifactError::NotFound {
                        name: from.to_string(),
                    }
                } else {
                    ArtifactError::RenameFailed {
                        from: from.to_string(),
                        to: to.to_string(),
                        source: e,
                    }
                }
            })
    }

    async fn exists(&self, artifact: &ArtifactName) -> Result<bool, ArtifactError> {
        let path = self.location(artifact);
        fs::try_exists(&path)
            .await
            .map_err(|e| ArtifactError::storage("check", &path, e))
    }

    async fn delete(&self, artifact: &ArtifactName) -> Result<(), ArtifactError> {
        let path = self.location(artifact);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ArtifactError::storage("delete", &path, e)),
        }
    }
}
