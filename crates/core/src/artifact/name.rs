//! Validated artifact identifiers.

use std::fmt;

use uuid::Uuid;

use super::ArtifactError;
use crate::place::Category;

/// File extension used by every artifact.
const EXTENSION: &str = "json";

/// A plain file name inside the artifact directory.
///
/// Names never contain path separators or parent references, so an
/// artifact can't escape its store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName(String);

impl ArtifactName {
    pub fn new(name: impl Into<String>) -> Result<Self, ArtifactError> {
        let name = name.into();
        let invalid = |reason: &str| ArtifactError::InvalidName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name contains a path separator"));
        }
        if name.starts_with('.') {
            return Err(invalid("name starts with a dot"));
        }
        if name.chars().any(char::is_control) {
            return Err(invalid("name contains control characters"));
        }

        Ok(Self(name))
    }

    /// Scratch artifact for one fetch job.
    pub fn scratch(job_id: &Uuid) -> Self {
        Self(format!("scratch-{}.{}", job_id, EXTENSION))
    }

    /// Durable artifact holding the latest results of a category.
    pub fn durable(category: &Category) -> Result<Self, ArtifactError> {
        Self::new(format!("{}.{}", category.as_str(), EXTENSION))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
