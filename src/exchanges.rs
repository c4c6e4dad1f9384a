//! Request and response bodies for the restaurant listing endpoints.

use serde::{Deserialize, Serialize};

use qeats_search::{GeoPoint, Restaurant, SearchQuery};

use crate::error::{QeatsError, Result};

/// A restaurant listing or search request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRestaurantsRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Free-text search. Absent for nearby listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_for: Option<String>,
}

impl GetRestaurantsRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            search_for: None,
        }
    }

    pub fn with_search_for(mut self, search_for: impl Into<String>) -> Self {
        self.search_for = Some(search_for.into());
        self
    }

    /// Checks that the coordinates are finite and within range.
    ///
    /// # Errors
    ///
    /// Returns [`QeatsError::InvalidRequest`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(QeatsError::InvalidRequest(format!(
                "latitude must be within [-90, 90], got {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(QeatsError::InvalidRequest(format!(
                "longitude must be within [-180, 180], got {}",
                self.longitude
            )));
        }
        Ok(())
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// The search query for this request; a missing `searchFor` is empty.
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery::new(self.search_for.clone().unwrap_or_default(), self.point())
    }
}

/// The restaurants matching a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GetRestaurantsResponse {
    pub restaurants: Vec<Restaurant>,
}

impl GetRestaurantsResponse {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }
}
