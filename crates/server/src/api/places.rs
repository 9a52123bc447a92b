//! Place lookup API handlers.
//!
//! Fetching handlers run the orchestration on a spawned task: once a
//! worker has been started it runs to completion and publishes its
//! artifacts even if the client goes away.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

use nearby_core::{
    Category, FetchError, FetchRequest, LocationSearchResponse, Place, RecommendationsResponse,
    RequestError,
};

use super::ApiError;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Request body for a location search
#[derive(Debug, Deserialize)]
pub struct LocationBody {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationBody {
    fn coordinates(&self) -> Result<(f64, f64), RequestError> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok((latitude, longitude)),
            _ => Err(RequestError::MissingCoordinates),
        }
    }
}

/// Request body for an on-demand fetch
#[derive(Debug, Deserialize)]
pub struct FetchingDataBody {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Search term; the configured default category when absent
    pub amenity: Option<String>,
}

/// Request body for a free-text recommendation query
#[derive(Debug, Deserialize)]
pub struct RecommendationsBody {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub query: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Fetch every configured category for a location and publish the results
pub async fn search_location(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LocationBody>, JsonRejection>,
) -> Result<Json<LocationSearchResponse>, ApiError> {
    let Json(body) = body?;
    let (latitude, longitude) = body.coordinates()?;
    info!("Location search at ({}, {})", latitude, longitude);

    let orchestrator = state.orchestrator();
    let results = detached(None, async move {
        orchestrator.search_location(latitude, longitude).await
    })
    .await?;

    Ok(Json(results.into()))
}

/// Fetch one category for a location without publishing it
pub async fn fetching_data(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FetchingDataBody>, JsonRejection>,
) -> Result<Json<Vec<Place>>, ApiError> {
    let Json(body) = body?;
    let category = match body.amenity {
        Some(amenity) => Category::new(amenity)?,
        None => state.orchestrator().default_category(),
    };
    let request = FetchRequest::from_parts(body.latitude, body.longitude, category)?;
    info!(
        "On-demand fetch of {} at ({}, {})",
        request.category(),
        request.latitude(),
        request.longitude()
    );

    let orchestrator = state.orchestrator();
    let result = detached(None, async move { orchestrator.fetch_single(request).await }).await?;

    Ok(Json(result.into_places()))
}

/// Latest published restaurant results
pub async fn restaurant_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Place>>, ApiError> {
    read_published(&state, Category::restaurant()).await
}

/// Latest published hotel results
pub async fn hotel_data(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Place>>, ApiError> {
    read_published(&state, Category::hotel()).await
}

/// Free-text search around a location
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RecommendationsBody>, JsonRejection>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let Json(body) = body?;
    let query = body
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let (Some(latitude), Some(longitude), Some(query)) = (body.latitude, body.longitude, query)
    else {
        return Err(ApiError::bad_request("Missing latitude, longitude, or query"));
    };
    let request = FetchRequest::new(latitude, longitude, Category::new(query)?)?;
    info!(
        "Recommendations for {:?} at ({}, {})",
        query, latitude, longitude
    );

    let orchestrator = state.orchestrator();
    let result = detached(Some("recommendations"), async move {
        orchestrator.fetch_single(request).await
    })
    .await?;

    Ok(Json(result.into()))
}

// ============================================================================
// Helpers
// ============================================================================

async fn read_published(state: &AppState, category: Category) -> Result<Json<Vec<Place>>, ApiError> {
    let result = state.orchestrator().read_category(&category).await?;
    Ok(Json(result.into_places()))
}

/// Runs `fetch` on its own task so a dropped request does not cancel it.
async fn detached<T, F>(subject: Option<&'static str>, fetch: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    match tokio::spawn(fetch).await {
        Ok(result) => result.map_err(|e| ApiError::from_fetch(&e, subject)),
        Err(e) => Err(ApiError::internal(format!("Fetch task failed: {}", e))),
    }
}
