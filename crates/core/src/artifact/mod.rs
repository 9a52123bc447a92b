//! Artifact store for fetch results.
//!
//! Fetch workers hand results back through files: a worker writes a
//! scratch artifact, the orchestrator reads it or publishes it under a
//! per-category durable name with a rename. All writes go through a
//! temporary file and a rename, so the presence of an artifact implies its
//! content is complete.

mod error;
mod fs_store;
mod name;
mod traits;

pub use error::ArtifactError;
pub use fs_store::{write_result_atomically, FsArtifactStore};
pub use name::ArtifactName;
pub use traits::ArtifactStore;
