//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a scripted fetch worker and a temporary artifact directory,
//! enabling E2E testing without spawning worker processes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use nearby_core::{
    testing::MockFetchWorker, ArtifactsConfig, CompletionWatcher, Config, FetchOrchestrator,
    FsArtifactStore, ProviderConfig, SearchConfig, ServerConfig, WatcherConfig, WorkerConfig,
};

/// Re-export fixtures for test convenience
pub use nearby_core::testing::fixtures;

/// Test fixture for E2E testing with a mock fetch worker.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new().await;
///     fixture.worker.set_result("hotel", fixtures::places("Inn", 2)).await;
///
///     let response = fixture.post("/search_location", json!({
///         "latitude": 40.7128,
///         "longitude": -74.0060
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock worker - script per-category behavior
    pub worker: Arc<MockFetchWorker>,
    /// Artifact directory
    pub artifacts_dir: PathBuf,
    /// Temporary directory for artifacts and static files
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// Raw body, for non-JSON responses
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default settings.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let artifacts_dir = temp_dir.path().join("data");

        let static_dir = test_config.static_index.as_ref().map(|html| {
            let dir = temp_dir.path().join("static");
            std::fs::create_dir_all(&dir).expect("Failed to create static dir");
            std::fs::write(dir.join("index.html"), html).expect("Failed to write index.html");
            dir
        });

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
                static_dir,
            },
            provider: ProviderConfig::with_api_key("test-key"),
            worker: WorkerConfig::default(),
            artifacts: ArtifactsConfig {
                dir: artifacts_dir.clone(),
            },
            watcher: WatcherConfig {
                poll_interval_ms: test_config.poll_interval.as_millis() as u64,
                budget_ms: test_config.budget.as_millis() as u64,
            },
            search: SearchConfig::default(),
        };

        let store = FsArtifactStore::open(&artifacts_dir)
            .await
            .expect("Failed to open artifact store");
        let worker = Arc::new(MockFetchWorker::new());

        let orchestrator = FetchOrchestrator::new(
            config.search.clone(),
            Arc::new(store),
            Arc::clone(&worker) as Arc<dyn nearby_core::FetchWorker>,
            CompletionWatcher::from_config(&config.watcher),
        );

        let state = Arc::new(nearby_server::state::AppState::new(
            config,
            Arc::new(orchestrator),
        ));

        let router = nearby_server::api::create_router(state);

        Self {
            router,
            worker,
            artifacts_dir,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Names of the files currently in the artifact directory, sorted.
    pub fn artifact_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.artifacts_dir)
            .expect("Failed to read artifact dir")
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Watcher poll interval
    pub poll_interval: Duration,
    /// Watcher budget
    pub budget: Duration,
    /// Serve a static directory holding this index.html
    pub static_index: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(20),
            budget: Duration::from_millis(300),
            static_index: None,
        }
    }
}

impl TestConfig {
    /// Create config with a static front-end.
    pub fn with_static_index(html: &str) -> Self {
        Self {
            static_index: Some(html.to_string()),
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            $response.text
        );
    };
}
