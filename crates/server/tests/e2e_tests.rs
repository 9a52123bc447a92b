//! End-to-end tests with a mocked fetch worker.
//!
//! These tests run the full HTTP stack in-process: routing, request
//! validation, orchestration against a real artifact directory, and error
//! rendering.

mod common;

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestConfig, TestFixture};

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint_redacts_api_key() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["provider"]["api_key_configured"], true);
    assert!(response.body["provider"].get("api_key").is_none());
    assert!(!response.text.contains("test-key"));
    assert_eq!(response.body["watcher"]["poll_interval_ms"], 20);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    fixture.get("/health").await;

    let response = fixture.get("/metrics").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("nearby_http_requests_total"));
    assert!(response.text.contains("nearby_durable_artifacts"));
}

// =============================================================================
// Location Search
// =============================================================================

#[tokio::test]
async fn test_search_location_returns_both_categories() {
    let fixture = TestFixture::new().await;
    fixture
        .worker
        .set_result("restaurant", fixtures::places("Diner", 5))
        .await;
    fixture
        .worker
        .set_result("hotel", fixtures::places("Inn", 3))
        .await;

    let response = fixture
        .post(
            "/search_location",
            json!({ "latitude": 40.7128, "longitude": -74.0060 }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Location search completed");
    let restaurants = response.body["results"]["restaurant"].as_array().unwrap();
    let hotels = response.body["results"]["hotel"].as_array().unwrap();
    assert_eq!(restaurants.len(), 5);
    assert_eq!(hotels.len(), 3);
    assert_eq!(restaurants[0]["Name"], "Diner 0");
    assert!(restaurants[0].get("Opening Hour").is_some());

    assert_eq!(
        fixture.artifact_files(),
        vec!["hotel.json", "restaurant.json"]
    );
}

#[tokio::test]
async fn test_published_data_readable_after_search() {
    let fixture = TestFixture::new().await;
    fixture
        .worker
        .set_result("restaurant", fixtures::places("Diner", 2))
        .await;
    fixture
        .worker
        .set_result("hotel", fixtures::places("Inn", 4))
        .await;

    fixture
        .post("/search_location", json!({ "latitude": 1.0, "longitude": 2.0 }))
        .await;

    let restaurants = fixture.get("/restaurant_data").await;
    assert_status!(restaurants, StatusCode::OK);
    assert_eq!(restaurants.body.as_array().unwrap().len(), 2);

    let hotels = fixture.get("/hotel_data").await;
    assert_status!(hotels, StatusCode::OK);
    assert_eq!(hotels.body.as_array().unwrap().len(), 4);
    assert_eq!(hotels.body[0]["Name"], "Inn 0");
}

#[tokio::test]
async fn test_search_location_missing_coordinates() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/search_location", json!({ "latitude": 40.7128 }))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Missing latitude or longitude");
    assert_eq!(fixture.worker.invocation_count().await, 0);
}

#[tokio::test]
async fn test_search_location_out_of_range() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/search_location", json!({ "latitude": 95.0, "longitude": 0 }))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(fixture.worker.invocation_count().await, 0);
}

#[tokio::test]
async fn test_search_location_worker_failure_on_second_category() {
    let fixture = TestFixture::new().await;
    fixture
        .worker
        .set_result("restaurant", fixtures::places("Diner", 1))
        .await;
    fixture
        .worker
        .set_failure("hotel", 1, "Error: SERPAPI_KEY not found in environment variables.")
        .await;

    let response = fixture
        .post("/search_location", json!({ "latitude": 1.0, "longitude": 1.0 }))
        .await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body["error"],
        "Error fetching hotel: Error: SERPAPI_KEY not found in environment variables."
    );

    // The first category was published before the abort.
    assert_status!(fixture.get("/restaurant_data").await, StatusCode::OK);
    assert_status!(fixture.get("/hotel_data").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let fixture = TestFixture::new().await;

    let response = fixture.post_raw("/search_location", "{latitude: ").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_non_numeric_coordinates() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post(
            "/fetching_data",
            json!({ "latitude": "north", "longitude": 1.0 }),
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Published Data
// =============================================================================

#[tokio::test]
async fn test_restaurant_data_before_any_search() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/restaurant_data").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["error"],
        "No restaurant results available yet (restaurant.json not found)"
    );
}

#[tokio::test]
async fn test_corrupt_published_data_is_server_error() {
    let fixture = TestFixture::new().await;
    std::fs::write(fixture.artifacts_dir.join("hotel.json"), "[{\"Name\": ").unwrap();

    let response = fixture.get("/hotel_data").await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON in hotel.json"));
}

// =============================================================================
// On-demand Fetch
// =============================================================================

#[tokio::test]
async fn test_fetching_data_returns_flat_list() {
    let fixture = TestFixture::new().await;
    fixture
        .worker
        .set_result("cafe", fixtures::places("Cafe", 2))
        .await;

    let response = fixture
        .post(
            "/fetching_data",
            json!({ "latitude": 48.85, "longitude": 2.35, "amenity": "cafe" }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    let places = response.body.as_array().unwrap();
    assert_eq!(places.len(), 2);
    assert_eq!(places[1]["Name"], "Cafe 1");

    // Nothing published, scratch removed.
    assert!(fixture.artifact_files().is_empty());
}

#[tokio::test]
async fn test_fetching_data_defaults_to_restaurant() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/fetching_data", json!({ "latitude": 1, "longitude": 1 }))
        .await;

    assert_status!(response, StatusCode::OK);
    let invocations = fixture.worker.invocations().await;
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].category.as_str(), "restaurant");
}

#[tokio::test]
async fn test_fetching_data_worker_failure_includes_diagnostic() {
    let fixture = TestFixture::new().await;
    fixture
        .worker
        .set_failure("museum", 1, "Traceback: provider returned 401")
        .await;

    let response = fixture
        .post(
            "/fetching_data",
            json!({ "latitude": 1, "longitude": 1, "amenity": "museum" }),
        )
        .await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("Traceback: provider returned 401"));
}

#[tokio::test]
async fn test_fetching_data_invalid_artifact() {
    let fixture = TestFixture::new().await;
    fixture.worker.set_raw_output("bar", "{\"not\": \"a list\"}").await;

    let response = fixture
        .post(
            "/fetching_data",
            json!({ "latitude": 1, "longitude": 1, "amenity": "bar" }),
        )
        .await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON in scratch-"));
}

// =============================================================================
// Recommendations
// =============================================================================

#[tokio::test]
async fn test_recommendations_success() {
    let fixture = TestFixture::new().await;
    fixture
        .worker
        .set_result("pizza", fixtures::places("Pizza", 3))
        .await;

    let response = fixture
        .post(
            "/get_recommendations",
            json!({ "latitude": 10, "longitude": 10, "query": "  pizza " }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Recommendations fetched");
    assert_eq!(response.body["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(
        fixture.worker.invocations().await[0].category.as_str(),
        "pizza"
    );
}

#[tokio::test]
async fn test_recommendations_missing_query() {
    let fixture = TestFixture::new().await;

    for body in [
        json!({ "latitude": 10, "longitude": 10 }),
        json!({ "latitude": 10, "longitude": 10, "query": "   " }),
        json!({ "longitude": 10, "query": "pizza" }),
    ] {
        let response = fixture.post("/get_recommendations", body).await;
        assert_status!(response, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "Missing latitude, longitude, or query");
    }
    assert_eq!(fixture.worker.invocation_count().await, 0);
}

#[tokio::test]
async fn test_recommendations_timeout() {
    let fixture = TestFixture::with_config(TestConfig {
        poll_interval: Duration::from_millis(50),
        budget: Duration::from_millis(250),
        ..Default::default()
    })
    .await;
    fixture.worker.set_silent("pizza").await;

    let start = Instant::now();
    let response = fixture
        .post(
            "/get_recommendations",
            json!({ "latitude": 10, "longitude": 10, "query": "pizza" }),
        )
        .await;
    let elapsed = start.elapsed();

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .ends_with("not found after fetching recommendations"));
    assert!(elapsed >= Duration::from_millis(250));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_concurrent_requests_get_their_own_results() {
    let fixture = TestFixture::new().await;
    fixture.worker.set_run_time(Duration::from_millis(30)).await;
    fixture
        .worker
        .set_result("pizza", fixtures::places("Pizza", 1))
        .await;
    fixture
        .worker
        .set_result("sushi", fixtures::places("Sushi", 2))
        .await;

    let pizza = fixture.post(
        "/get_recommendations",
        json!({ "latitude": 1, "longitude": 1, "query": "pizza" }),
    );
    let sushi = fixture.post(
        "/get_recommendations",
        json!({ "latitude": 1, "longitude": 1, "query": "sushi" }),
    );
    let (pizza, sushi) = tokio::join!(pizza, sushi);

    assert_eq!(pizza.body["recommendations"][0]["Name"], "Pizza 0");
    assert_eq!(pizza.body["recommendations"].as_array().unwrap().len(), 1);
    assert_eq!(sushi.body["recommendations"][0]["Name"], "Sushi 0");
    assert_eq!(sushi.body["recommendations"].as_array().unwrap().len(), 2);
}

// =============================================================================
// Static Front-end
// =============================================================================

#[tokio::test]
async fn test_static_index_served_for_unknown_paths() {
    let fixture =
        TestFixture::with_config(TestConfig::with_static_index("<html>map</html>")).await;

    let response = fixture.get("/").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("map"));

    // API routes still win over the fallback
    assert_status!(fixture.get("/health").await, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_path_without_static_dir() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/InteractiveMap.html").await;
    assert_status!(response, StatusCode::NOT_FOUND);
}
