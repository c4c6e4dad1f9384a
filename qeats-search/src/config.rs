//! Aggregation configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which sources the concurrent path queries,
//! how long it waits for them, and the two serving radii.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::Source;

/// Serving radius used during peak hours.
pub const PEAK_RADIUS_KM: f64 = 3.0;

/// Serving radius used outside peak hours.
pub const OFF_PEAK_RADIUS_KM: f64 = 5.0;

/// Configuration for restaurant search aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Sources queried by the concurrent path, in merge order. On overlap
    /// the later source's copy of a restaurant wins.
    pub concurrent_sources: Vec<Source>,
    /// Upper bound in seconds on the concurrent path's wait for its lookups.
    pub timeout_seconds: u64,
    /// Radius in kilometres used during peak hours.
    pub peak_radius_km: f64,
    /// Radius in kilometres used outside peak hours.
    pub off_peak_radius_km: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            concurrent_sources: vec![Source::Name, Source::Attribute],
            timeout_seconds: 8,
            peak_radius_km: PEAK_RADIUS_KM,
            off_peak_radius_km: OFF_PEAK_RADIUS_KM,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `concurrent_sources` must not be empty or contain duplicates
    /// - `timeout_seconds` must be greater than 0
    /// - both radii must be finite and greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.concurrent_sources.is_empty() {
            return Err(SearchError::Config(
                "at least one concurrent source must be enabled".into(),
            ));
        }
        for (i, source) in self.concurrent_sources.iter().enumerate() {
            if self.concurrent_sources[..i].contains(source) {
                return Err(SearchError::Config(format!(
                    "concurrent source '{source}' listed more than once"
                )));
            }
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if !(self.peak_radius_km.is_finite() && self.peak_radius_km > 0.0) {
            return Err(SearchError::Config(
                "peak_radius_km must be a positive number".into(),
            ));
        }
        if !(self.off_peak_radius_km.is_finite() && self.off_peak_radius_km > 0.0) {
            return Err(SearchError::Config(
                "off_peak_radius_km must be a positive number".into(),
            ));
        }
        Ok(())
    }
}
