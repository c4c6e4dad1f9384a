//! Concurrent reduced-source search: fan out, join, last copy wins.
//!
//! Each configured source runs as its own task in a [`JoinSet`]. The
//! caller suspends on the join barrier, a timeout, and a
//! [`CancellationToken`]; whichever fires first decides the outcome.
//! Dropping the returned future drops the `JoinSet`, which aborts every
//! outstanding lookup.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveTime;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::finder::{RestaurantFinder, SourceQuery};
use crate::time_window::PeakPolicy;
use crate::types::{Restaurant, SearchQuery, Source};

use super::merge::merge_last_wins;

type LookupOutcome = (usize, Source, Result<Vec<Restaurant>, SearchError>);

/// Search `config.concurrent_sources` concurrently and merge last-wins.
///
/// # Pipeline
///
/// 1. Empty `search_for` returns an empty result without any lookup
/// 2. Pick the radius with [`PeakPolicy::Range`]
/// 3. Spawn one lookup task per configured source
/// 4. Wait for all of them, bounded by `config.timeout_seconds` and `cancel`
/// 5. Merge with [`merge_last_wins`] in configured source order, so on
///    overlap the later source's copy survives
///
/// Any lookup failure, task panic, timeout or cancellation discards every
/// partial result and returns an empty list. Nothing is propagated.
pub async fn search_concurrent<F>(
    finder: Arc<F>,
    query: &SearchQuery,
    time: NaiveTime,
    config: &SearchConfig,
    cancel: &CancellationToken,
) -> Vec<Restaurant>
where
    F: RestaurantFinder + 'static,
{
    if query.is_empty() {
        return Vec::new();
    }

    let radius = PeakPolicy::Range.radius_for(time, config);
    tracing::trace!(text = %query.search_for, radius_km = radius.radius_km, "concurrent search");

    let source_query = Arc::new(SourceQuery {
        point: query.point,
        text: query.search_for.clone(),
        time,
        radius_km: radius.radius_km,
    });

    let start = Instant::now();
    let mut tasks: JoinSet<LookupOutcome> = JoinSet::new();
    for (index, &source) in config.concurrent_sources.iter().enumerate() {
        let finder = Arc::clone(&finder);
        let source_query = Arc::clone(&source_query);
        tasks.spawn(async move {
            let result = finder.find_by_source(source, &source_query).await;
            (index, source, result)
        });
    }

    let timeout = Duration::from_secs(config.timeout_seconds);
    let outcome = tokio::select! {
        _ = cancel.cancelled() => Err(SearchError::Cancelled(
            "request abandoned before lookups completed".into(),
        )),
        joined = tokio::time::timeout(timeout, join_lookups(&mut tasks)) => match joined {
            Ok(result) => result,
            Err(_elapsed) => Err(SearchError::Timeout(format!(
                "lookups exceeded {}s",
                config.timeout_seconds
            ))),
        },
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    match outcome {
        Ok(lists) => {
            let merged = merge_last_wins(lists);
            tracing::debug!(count = merged.len(), elapsed_ms, "concurrent search merged");
            merged
        }
        Err(err) => {
            tasks.abort_all();
            tracing::warn!(error = %err, elapsed_ms, "concurrent search discarded");
            Vec::new()
        }
    }
}

/// Wait for every lookup, failing fast on the first error.
///
/// Returns the result lists ordered by their spawn index.
async fn join_lookups(
    tasks: &mut JoinSet<LookupOutcome>,
) -> Result<Vec<Vec<Restaurant>>, SearchError> {
    let mut lists: Vec<(usize, Vec<Restaurant>)> = Vec::with_capacity(tasks.len());

    while let Some(joined) = tasks.join_next().await {
        let (index, source, result) =
            joined.map_err(|e| SearchError::Task(format!("lookup task failed: {e}")))?;
        match result {
            Ok(results) => {
                tracing::debug!(%source, count = results.len(), "source returned results");
                lists.push((index, results));
            }
            Err(err) => {
                tracing::warn!(%source, error = %err, "source lookup failed");
                return Err(err);
            }
        }
    }

    lists.sort_by_key(|(index, _)| *index);
    Ok(lists.into_iter().map(|(_, results)| results).collect())
}
