//! The public entry point tying a finder to a validated configuration.

use std::sync::Arc;

use chrono::NaiveTime;
use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::finder::RestaurantFinder;
use crate::orchestrator::{concurrent, sequential};
use crate::time_window::PeakPolicy;
use crate::types::{GeoPoint, Restaurant, SearchQuery};

/// Aggregates restaurant lookups from a [`RestaurantFinder`].
///
/// The two search paths differ on purpose:
///
/// | | [`search`](Self::search) | [`search_concurrent`](Self::search_concurrent) |
/// |---|---|---|
/// | sources | all four, in order | `config.concurrent_sources` |
/// | overlap | first source's copy kept | last source's copy kept |
/// | order | first-seen | unspecified |
/// | lookup failure | propagated | empty result |
pub struct SearchAggregator<F> {
    finder: Arc<F>,
    config: SearchConfig,
}

impl<F> Clone for SearchAggregator<F> {
    fn clone(&self) -> Self {
        Self {
            finder: Arc::clone(&self.finder),
            config: self.config.clone(),
        }
    }
}

impl<F> SearchAggregator<F>
where
    F: RestaurantFinder + 'static,
{
    /// Create an aggregator over `finder`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`](crate::SearchError::Config) if
    /// `config` fails validation.
    pub fn new(finder: Arc<F>, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { finder, config })
    }

    /// Create an aggregator with [`SearchConfig::default()`].
    pub fn with_defaults(finder: Arc<F>) -> Self {
        Self {
            finder,
            config: SearchConfig::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Restaurants near `point`, with the radius picked by
    /// [`PeakPolicy::Coarse`].
    ///
    /// # Errors
    ///
    /// Propagates the finder's error.
    pub async fn find_nearby(&self, point: GeoPoint, time: NaiveTime) -> Result<Vec<Restaurant>> {
        let radius = PeakPolicy::Coarse.radius_for(time, &self.config);
        let restaurants = self
            .finder
            .find_nearby(point, time, radius.radius_km)
            .await?;
        tracing::debug!(
            count = restaurants.len(),
            radius_km = radius.radius_km,
            is_peak = radius.is_peak,
            "nearby lookup"
        );
        Ok(restaurants)
    }

    /// Sequential four-source search. See
    /// [`search_sequential`](sequential::search_sequential).
    ///
    /// # Errors
    ///
    /// Propagates the first failing lookup's error.
    pub async fn search(&self, query: &SearchQuery, time: NaiveTime) -> Result<Vec<Restaurant>> {
        sequential::search_sequential(self.finder.as_ref(), query, time, &self.config).await
    }

    /// Concurrent search over the configured sources. Never fails; any
    /// failure yields an empty result.
    pub async fn search_concurrent(&self, query: &SearchQuery, time: NaiveTime) -> Vec<Restaurant> {
        self.search_concurrent_with_cancel(query, time, &CancellationToken::new())
            .await
    }

    /// Like [`search_concurrent`](Self::search_concurrent), additionally
    /// returning an empty result as soon as `cancel` fires.
    pub async fn search_concurrent_with_cancel(
        &self,
        query: &SearchQuery,
        time: NaiveTime,
        cancel: &CancellationToken,
    ) -> Vec<Restaurant> {
        concurrent::search_concurrent(Arc::clone(&self.finder), query, time, &self.config, cancel)
            .await
    }
}
