//! # qeats-search
//!
//! Restaurant search aggregation for QEats.
//!
//! This crate decides how far to look for restaurants at a given time of
//! day and merges the answers of several independent search sources into
//! one deduplicated list. It does not store restaurants, compute distances
//! or match text: those are delegated to a [`RestaurantFinder`].
//!
//! ## Design
//!
//! - Serving radius: 3 km at peak times, 5 km otherwise, under one of two
//!   peak-hour policies ([`PeakPolicy`])
//! - Sequential search over four sources (name, attribute, item name,
//!   item attribute) with first-copy-wins, order-preserving dedup
//! - Concurrent search over a configured subset (name and attribute by
//!   default) with last-copy-wins dedup, a timeout, and cancellation
//! - Graceful degradation on the concurrent path: any failure yields an
//!   empty result rather than a partial one

pub mod aggregator;
pub mod config;
pub mod error;
pub mod finder;
pub mod orchestrator;
pub mod time_window;
pub mod types;

pub use aggregator::SearchAggregator;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use finder::{RestaurantFinder, SourceQuery};
pub use time_window::{PeakPolicy, ServingRadius};
pub use types::{GeoPoint, Restaurant, SearchQuery, Source};
