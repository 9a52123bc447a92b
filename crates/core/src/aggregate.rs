//! Client-facing result shapes.
//!
//! A single fetch is returned as a flat list of places, a location search
//! as a mapping keyed by category (in search order), and recommendations
//! wrapped with a message. Failures become an [`ErrorClass`] plus a
//! human-readable message.

use serde::ser::{Serialize, Serializer};

use crate::orchestrator::FetchError;
use crate::place::{Category, FetchResult, Place};

/// Results of a multi-category fetch, in category order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryResults(Vec<(Category, FetchResult)>);

impl CategoryResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: Category, result: FetchResult) {
        self.0.push((category, result));
    }

    pub fn get(&self, category: &str) -> Option<&FetchResult> {
        self.0
            .iter()
            .find(|(c, _)| c.as_str() == category)
            .map(|(_, r)| r)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.0.iter().map(|(c, _)| c)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(c, r)| (c.as_str(), r)))
    }
}

/// Body of a successful location search.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LocationSearchResponse {
    pub message: String,
    pub results: CategoryResults,
}

impl From<CategoryResults> for LocationSearchResponse {
    fn from(results: CategoryResults) -> Self {
        Self {
            message: "Location search completed".to_string(),
            results,
        }
    }
}

/// Body of a successful recommendation query.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecommendationsResponse {
    pub message: String,
    pub recommendations: Vec<Place>,
}

impl From<FetchResult> for RecommendationsResponse {
    fn from(result: FetchResult) -> Self {
        Self {
            message: "Recommendations fetched".to_string(),
            recommendations: result.into_places(),
        }
    }
}

/// How a failure is reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad client input.
    Validation,
    /// A durable artifact does not exist yet.
    NotFound,
    /// Worker, timeout, parse or storage failure.
    Internal,
}

impl From<&FetchError> for ErrorClass {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::Validation(_) => Self::Validation,
            FetchError::NotFound { .. } => Self::NotFound,
            _ => Self::Internal,
        }
    }
}

/// Renders a failure for the client.
///
/// `subject` names what was being fetched when it differs from the raw
/// search term, e.g. `"recommendations"` for a free-text query.
pub fn describe(err: &FetchError, subject: Option<&str>) -> String {
    match (err, subject) {
        (FetchError::WorkerFailure { diagnostic, .. }, Some(subject)) => {
            format!("Error fetching {}: {}", subject, diagnostic)
        }
        (FetchError::Timeout { artifact, .. }, Some(subject)) => {
            format!("{} not found after fetching {}", artifact, subject)
        }
        (err, _) => err.to_string(),
    }
}
