//! Sequential four-source search: one lookup at a time, first copy wins.
//!
//! This is the correctness baseline for the concurrent path. It has no
//! concurrency at all and surfaces the first lookup failure to the caller.

use chrono::NaiveTime;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::finder::{RestaurantFinder, SourceQuery};
use crate::time_window::PeakPolicy;
use crate::types::{Restaurant, SearchQuery, Source};

use super::merge::merge_first_wins;

/// Search every source in canonical order and merge first-occurrence-wins.
///
/// # Pipeline
///
/// 1. Empty `search_for` returns an empty result without any lookup
/// 2. Pick the radius with [`PeakPolicy::Range`]
/// 3. Query by name, attribute, item name and item attribute, in that
///    order; all four run even when later ones are redundant
/// 4. Merge with [`merge_first_wins`]
///
/// # Errors
///
/// Returns the first lookup's [`SearchError`] unchanged. Lookups after a
/// failing one are not issued.
pub async fn search_sequential<F>(
    finder: &F,
    query: &SearchQuery,
    time: NaiveTime,
    config: &SearchConfig,
) -> Result<Vec<Restaurant>, SearchError>
where
    F: RestaurantFinder + ?Sized,
{
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let radius = PeakPolicy::Range.radius_for(time, config);
    tracing::trace!(text = %query.search_for, radius_km = radius.radius_km, "sequential search");

    let source_query = SourceQuery {
        point: query.point,
        text: query.search_for.clone(),
        time,
        radius_km: radius.radius_km,
    };

    let mut lists = Vec::with_capacity(Source::all().len());
    for &source in Source::all() {
        let results = finder.find_by_source(source, &source_query).await?;
        tracing::debug!(%source, count = results.len(), "source returned results");
        lists.push(results);
    }

    let merged = merge_first_wins(lists);
    tracing::debug!(
        count = merged.len(),
        is_peak = radius.is_peak,
        "sequential search merged"
    );
    Ok(merged)
}
