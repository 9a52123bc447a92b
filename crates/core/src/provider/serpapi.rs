//! SerpApi Google Maps client.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::place::{FetchRequest, FetchResult};

use super::normalize::normalize_response;
use super::{ProviderConfig, ProviderError};

/// Map zoom level sent with every search.
const ZOOM: u8 = 16;

/// SerpApi-backed place search.
pub struct SerpApiClient {
    client: Client,
    config: ProviderConfig,
}

impl SerpApiClient {
    /// Create a new client. Fails when the API key is blank.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Query parameters for a search, credential excluded.
    pub fn build_query(request: &FetchRequest) -> Vec<(&'static str, String)> {
        vec![
            ("engine", "google_maps".to_string()),
            ("q", request.category().to_string()),
            ("type", "search".to_string()),
            (
                "ll",
                format!("@{},{},{}z", request.latitude(), request.longitude(), ZOOM),
            ),
        ]
    }

    /// Run one search and normalize the top results.
    pub async fn search(&self, request: &FetchRequest) -> Result<FetchResult, ProviderError> {
        let mut query = Self::build_query(request);
        query.push(("api_key", self.config.api_key.clone()));

        debug!(
            category = %request.category(),
            latitude = request.latitude(),
            longitude = request.longitude(),
            "Querying provider"
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else if e.is_connect() {
                    ProviderError::ConnectionFailed(e.to_string())
                } else {
                    ProviderError::ApiError(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(ProviderError::ApiError(message.to_string()));
        }

        Ok(normalize_response(&body))
    }
}
