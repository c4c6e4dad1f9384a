//! Trait definition for the restaurant lookup collaborator.
//!
//! The aggregator never stores restaurants, computes distances or matches
//! text itself. It delegates all of that to a [`RestaurantFinder`] and only
//! decides which lookups to issue, with which radius, and how to merge them.

use std::future::Future;

use chrono::NaiveTime;

use crate::error::SearchError;
use crate::types::{GeoPoint, Restaurant, Source};

/// The arguments shared by every text lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceQuery {
    /// Where the user is searching from.
    pub point: GeoPoint,
    /// The text to match.
    pub text: String,
    /// Clock time of the request, for opening-hours filtering.
    pub time: NaiveTime,
    /// Only restaurants within this many kilometres are returned.
    pub radius_km: f64,
}

/// A restaurant lookup backend.
///
/// Implementors find restaurants near a point within a radius, either
/// unconditionally or matching text against one [`Source`].
///
/// All methods return `Send` futures so lookups can be spawned onto the
/// runtime. A spawned lookup's [`tokio::task::JoinHandle`] is its
/// cancellable handle: `is_finished`, `.await` and `abort`.
pub trait RestaurantFinder: Send + Sync {
    /// Restaurants within `radius_km` of `point` that are open at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Source`] if the backing store cannot be queried.
    fn find_nearby(
        &self,
        point: GeoPoint,
        time: NaiveTime,
        radius_km: f64,
    ) -> impl Future<Output = Result<Vec<Restaurant>, SearchError>> + Send;

    /// Restaurants whose name matches `query.text`.
    fn find_by_name(
        &self,
        query: &SourceQuery,
    ) -> impl Future<Output = Result<Vec<Restaurant>, SearchError>> + Send;

    /// Restaurants whose cuisines or attributes match `query.text`.
    fn find_by_attribute(
        &self,
        query: &SourceQuery,
    ) -> impl Future<Output = Result<Vec<Restaurant>, SearchError>> + Send;

    /// Restaurants serving an item whose name matches `query.text`.
    fn find_by_item_name(
        &self,
        query: &SourceQuery,
    ) -> impl Future<Output = Result<Vec<Restaurant>, SearchError>> + Send;

    /// Restaurants serving an item whose attributes match `query.text`.
    fn find_by_item_attribute(
        &self,
        query: &SourceQuery,
    ) -> impl Future<Output = Result<Vec<Restaurant>, SearchError>> + Send;

    /// Dispatches to the lookup for `source`.
    fn find_by_source(
        &self,
        source: Source,
        query: &SourceQuery,
    ) -> impl Future<Output = Result<Vec<Restaurant>, SearchError>> + Send {
        async move {
            match source {
                Source::Name => self.find_by_name(query).await,
                Source::Attribute => self.find_by_attribute(query).await,
                Source::ItemName => self.find_by_item_name(query).await,
                Source::ItemAttribute => self.find_by_item_attribute(query).await,
            }
        }
    }
}
