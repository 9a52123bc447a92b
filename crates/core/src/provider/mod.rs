//! Place-search provider access used by the fetch worker.
//!
//! The worker binary calls [`SerpApiClient::search`] and writes the
//! normalized [`FetchResult`](crate::place::FetchResult) as its artifact.
//! The HTTP server never talks to the provider directly.

mod config;
mod normalize;
mod serpapi;

pub use config::{ProviderConfig, BASE_URL_ENV, TIMEOUT_ENV};
pub use normalize::{normalize_place, normalize_response};
pub use serpapi::SerpApiClient;

use thiserror::Error;

/// Errors raised while querying the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider API key is not configured")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Provider request timed out")]
    Timeout,

    #[error("Provider connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Provider API error: {0}")]
    ApiError(String),
}
