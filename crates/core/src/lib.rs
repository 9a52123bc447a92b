pub mod aggregate;
pub mod artifact;
pub mod config;
pub mod metrics;
pub mod orchestrator;
pub mod place;
pub mod provider;
pub mod testing;
pub mod watcher;
pub mod worker;

pub use aggregate::{
    describe, CategoryResults, ErrorClass, LocationSearchResponse, RecommendationsResponse,
};
pub use artifact::{
    write_result_atomically, ArtifactError, ArtifactName, ArtifactStore, FsArtifactStore,
};
pub use config::{
    load_config, load_config_from_str, validate_config, ArtifactsConfig, Config, ConfigError,
    SanitizedConfig, ServerConfig,
};
pub use orchestrator::{FetchError, FetchJob, FetchOrchestrator, JobState, SearchConfig};
pub use place::{Category, FetchRequest, FetchResult, Place, RequestError, MAX_RESULTS};
pub use provider::{ProviderConfig, ProviderError, SerpApiClient};
pub use watcher::{CompletionWatcher, WatchError, WatchTimeout, WatcherConfig};
pub use worker::{FetchWorker, ProcessWorker, WorkerConfig, WorkerError, WorkerOutput};
