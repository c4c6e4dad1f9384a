//! Restaurant listing and search service.
//!
//! [`RestaurantService`] validates requests, hands them to the
//! [`SearchAggregator`], and wraps the results in a
//! [`GetRestaurantsResponse`]. Each call runs in its own `restaurant_request`
//! span tagged with a fresh request id.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveTime;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use qeats_search::{RestaurantFinder, SearchAggregator};

use crate::config::QeatsConfig;
use crate::error::{QeatsError, Result};
use crate::exchanges::{GetRestaurantsRequest, GetRestaurantsResponse};

/// Serves nearby listings and text searches over a [`RestaurantFinder`].
pub struct RestaurantService<F> {
    aggregator: SearchAggregator<F>,
}

impl<F> RestaurantService<F>
where
    F: RestaurantFinder + 'static,
{
    /// Create a service over `finder` using the `[search]` settings of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the search settings are invalid.
    pub fn new(finder: Arc<F>, config: &QeatsConfig) -> Result<Self> {
        let aggregator = SearchAggregator::new(finder, config.search.clone())?;
        Ok(Self { aggregator })
    }

    /// The aggregator this service delegates to, with its validated settings.
    pub fn aggregator(&self) -> &SearchAggregator<F> {
        &self.aggregator
    }

    /// Restaurants near the request's point. `searchFor` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`QeatsError::InvalidRequest`](crate::QeatsError::InvalidRequest)
    /// for bad coordinates, or the finder's error.
    pub async fn find_all_restaurants_close_by(
        &self,
        request: &GetRestaurantsRequest,
        time: NaiveTime,
    ) -> Result<GetRestaurantsResponse> {
        request.validate()?;
        let span = request_span("close_by");
        async {
            let start = Instant::now();
            let restaurants = self.aggregator.find_nearby(request.point(), time).await?;
            log_served(restaurants.len(), start);
            Ok::<_, QeatsError>(GetRestaurantsResponse::new(restaurants))
        }
        .instrument(span)
        .await
    }

    /// Restaurants matching `searchFor` across all four sources, in
    /// first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`QeatsError::InvalidRequest`](crate::QeatsError::InvalidRequest)
    /// for bad coordinates, or the first failing lookup's error.
    pub async fn find_restaurants_by_search_query(
        &self,
        request: &GetRestaurantsRequest,
        time: NaiveTime,
    ) -> Result<GetRestaurantsResponse> {
        request.validate()?;
        let span = request_span("search");
        async {
            let start = Instant::now();
            let restaurants = self.aggregator.search(&request.to_query(), time).await?;
            log_served(restaurants.len(), start);
            Ok::<_, QeatsError>(GetRestaurantsResponse::new(restaurants))
        }
        .instrument(span)
        .await
    }

    /// Restaurants matching `searchFor`, queried concurrently over the
    /// configured sources. Order is unspecified and a lookup failure yields
    /// an empty response.
    ///
    /// # Errors
    ///
    /// Only request validation can fail.
    pub async fn find_restaurants_by_search_query_mt(
        &self,
        request: &GetRestaurantsRequest,
        time: NaiveTime,
    ) -> Result<GetRestaurantsResponse> {
        self.find_restaurants_by_search_query_mt_with_cancel(
            request,
            time,
            &CancellationToken::new(),
        )
        .await
    }

    /// Like [`find_restaurants_by_search_query_mt`](Self::find_restaurants_by_search_query_mt),
    /// answering with an empty response as soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// Only request validation can fail.
    pub async fn find_restaurants_by_search_query_mt_with_cancel(
        &self,
        request: &GetRestaurantsRequest,
        time: NaiveTime,
        cancel: &CancellationToken,
    ) -> Result<GetRestaurantsResponse> {
        request.validate()?;
        let span = request_span("search_mt");
        async {
            let start = Instant::now();
            let restaurants = self
                .aggregator
                .search_concurrent_with_cancel(&request.to_query(), time, cancel)
                .await;
            log_served(restaurants.len(), start);
            Ok::<_, QeatsError>(GetRestaurantsResponse::new(restaurants))
        }
        .instrument(span)
        .await
    }
}

fn request_span(operation: &'static str) -> tracing::Span {
    tracing::info_span!(
        "restaurant_request",
        request_id = %Uuid::new_v4(),
        operation
    )
}

fn log_served(count: usize, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::info!(count, elapsed_ms, "restaurants served");
}
