//! Testing utilities and mock implementations.
//!
//! Lets the orchestrator and the HTTP layer be exercised without spawning
//! real worker processes or calling the place-search provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use nearby_core::testing::{fixtures, MockFetchWorker};
//!
//! let worker = MockFetchWorker::new();
//! worker.set_result("restaurant", fixtures::places("Diner", 3)).await;
//! worker.set_silent("hotel").await;
//!
//! // Use in a FetchOrchestrator...
//! ```

mod mock_worker;

pub use mock_worker::{MockFetchWorker, RecordedInvocation, WorkerScript};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::place::{FetchResult, Place};

    /// Create a place with reasonable defaults.
    pub fn place(name: &str) -> Place {
        Place {
            name: Some(name.to_string()),
            address: Some(format!("1 {} Street", name)),
            rating: Some(4.5),
            price: Some("$$".to_string()),
            hours: Some(serde_json::Value::String("Open now".to_string())),
            latitude: Some(40.7128),
            longitude: Some(-74.006),
        }
    }

    /// Create `count` places named `"<prefix> 0"`, `"<prefix> 1"`, ...
    pub fn places(prefix: &str, count: usize) -> FetchResult {
        (0..count)
            .map(|i| place(&format!("{} {}", prefix, i)))
            .collect()
    }
}
