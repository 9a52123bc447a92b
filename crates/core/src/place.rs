//! Place model shared by the worker, the artifact store and the HTTP API.
//!
//! The serialized form of [`Place`] is the artifact wire format: a JSON
//! object with the keys `Name`, `Address`, `Rating`, `Price`,
//! `Opening Hour`, `Latitude` and `Longitude`, any of which may be `null`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of places kept per fetch.
pub const MAX_RESULTS: usize = 5;

/// Invalid request input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("Missing latitude or longitude")]
    MissingCoordinates,

    #[error("Invalid latitude: {0} (expected -90..=90)")]
    InvalidLatitude(f64),

    #[error("Invalid longitude: {0} (expected -180..=180)")]
    InvalidLongitude(f64),

    #[error("Missing category or query")]
    EmptyCategory,
}

/// A search term for one fetch job: an amenity keyword such as
/// `restaurant`, or a free-text query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    pub const RESTAURANT: &'static str = "restaurant";
    pub const HOTEL: &'static str = "hotel";

    /// Creates a category from user input. Surrounding whitespace is dropped.
    pub fn new(term: impl AsRef<str>) -> Result<Self, RequestError> {
        let term = term.as_ref().trim();
        if term.is_empty() {
            return Err(RequestError::EmptyCategory);
        }
        Ok(Self(term.to_string()))
    }

    pub fn restaurant() -> Self {
        Self(Self::RESTAURANT.to_string())
    }

    pub fn hotel() -> Self {
        Self(Self::HOTEL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Category {
    type Error = RequestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

/// Coordinates plus the search term for one fetch job.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    latitude: f64,
    longitude: f64,
    category: Category,
}

impl FetchRequest {
    /// Builds a request, rejecting out-of-range or non-finite coordinates.
    pub fn new(latitude: f64, longitude: f64, category: Category) -> Result<Self, RequestError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(RequestError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(RequestError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            category,
        })
    }

    /// Builds a request from optional client input.
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
        category: Category,
    ) -> Result<Self, RequestError> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon, category),
            _ => Err(RequestError::MissingCoordinates),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Same coordinates, different search term.
    pub fn with_category(&self, category: Category) -> Self {
        Self {
            latitude: self.latitude,
            longitude: self.longitude,
            category,
        }
    }
}

/// One normalized search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "Rating", default)]
    pub rating: Option<f64>,
    #[serde(rename = "Price", default)]
    pub price: Option<String>,
    /// Free-form opening hours: a status string or a structured schedule.
    #[serde(rename = "Opening Hour", default)]
    pub hours: Option<serde_json::Value>,
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<f64>,
}

/// Ranked places for one fetch job, never longer than [`MAX_RESULTS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Place>", into = "Vec<Place>")]
pub struct FetchResult(Vec<Place>);

impl FetchResult {
    pub fn new(places: Vec<Place>) -> Self {
        Self::from(places)
    }

    pub fn places(&self) -> &[Place] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_places(self) -> Vec<Place> {
        self.0
    }
}

impl From<Vec<Place>> for FetchResult {
    fn from(mut places: Vec<Place>) -> Self {
        places.truncate(MAX_RESULTS);
        Self(places)
    }
}

impl From<FetchResult> for Vec<Place> {
    fn from(result: FetchResult) -> Self {
        result.0
    }
}

impl FromIterator<Place> for FetchResult {
    fn from_iter<I: IntoIterator<Item = Place>>(iter: I) -> Self {
        Self(iter.into_iter().take(MAX_RESULTS).collect())
    }
}
