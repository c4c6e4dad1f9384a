//! Core types for restaurant results, query points, and source identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A restaurant returned by a search source.
///
/// Only [`Restaurant::id`] takes part in deduplication. Every other field
/// passes through the aggregator untouched, so two values with the same
/// `id` are the same restaurant even when their other fields differ.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Stable unique identifier.
    #[serde(rename = "restaurantId")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// City the restaurant is located in.
    #[serde(default)]
    pub city: String,
    /// Cover image URL.
    #[serde(default)]
    pub image_url: String,
    /// Latitude in degrees.
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in degrees.
    #[serde(default)]
    pub longitude: f64,
    /// Opening time, `HH:MM`.
    #[serde(default)]
    pub opens_at: String,
    /// Closing time, `HH:MM`.
    #[serde(default)]
    pub closes_at: String,
    /// Cuisines and other attributes (e.g. "Chinese", "Spicy").
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A free-text restaurant search at a point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The text to match. An empty string matches nothing.
    pub search_for: String,
    /// Where the user is searching from.
    pub point: GeoPoint,
}

impl SearchQuery {
    pub fn new(search_for: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            search_for: search_for.into(),
            point,
        }
    }

    /// Returns `true` if there is no text to search for.
    ///
    /// Only a zero-length string counts; whitespace is passed to the sources.
    pub fn is_empty(&self) -> bool {
        self.search_for.is_empty()
    }
}

/// The independent matching strategies a search fans out to.
///
/// Declaration order is the canonical source order used by the sequential
/// merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Restaurant name, exact and inexact.
    Name,
    /// Cuisines and other restaurant attributes.
    Attribute,
    /// Names of menu items the restaurant serves.
    ItemName,
    /// Attributes of menu items (spicy, sweet, ...).
    ItemAttribute,
}

impl Source {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Attribute => "attribute",
            Self::ItemName => "item_name",
            Self::ItemAttribute => "item_attribute",
        }
    }

    /// Returns all sources in canonical order.
    pub fn all() -> &'static [Source] {
        &[
            Self::Name,
            Self::Attribute,
            Self::ItemName,
            Self::ItemAttribute,
        ]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
