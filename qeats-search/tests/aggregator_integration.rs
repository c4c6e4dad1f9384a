//! Integration tests for the search aggregator.
//!
//! These tests drive both search paths through a scripted in-memory finder
//! (no storage, no geodistance). Timing tests run on paused tokio time so
//! simulated lookup latency is deterministic.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveTime;
use tokio_util::sync::CancellationToken;

use qeats_search::{
    GeoPoint, Restaurant, RestaurantFinder, SearchAggregator, SearchConfig, SearchError,
    SearchQuery, Source, SourceQuery,
};

fn restaurant(id: &str, name: &str) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

fn at(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).expect("valid time")
}

fn query(text: &str) -> SearchQuery {
    SearchQuery::new(text, GeoPoint::new(12.9716, 77.5946))
}

fn ids(results: &[Restaurant]) -> Vec<&str> {
    results.iter().map(|r| r.id.as_str()).collect()
}

/// A finder that returns scripted results per source and records every call.
#[derive(Default)]
struct ScriptedFinder {
    results: HashMap<Source, Vec<Restaurant>>,
    nearby: Vec<Restaurant>,
    failing: Option<Source>,
    panicking: Option<Source>,
    latency: Duration,
    calls: Mutex<Vec<(Source, f64)>>,
    nearby_radii: Mutex<Vec<f64>>,
    completed: AtomicUsize,
}

impl ScriptedFinder {
    fn new() -> Self {
        Self::default()
    }

    fn with(mut self, source: Source, results: Vec<Restaurant>) -> Self {
        self.results.insert(source, results);
        self
    }

    fn with_nearby(mut self, results: Vec<Restaurant>) -> Self {
        self.nearby = results;
        self
    }

    fn failing(mut self, source: Source) -> Self {
        self.failing = Some(source);
        self
    }

    fn panicking(mut self, source: Source) -> Self {
        self.panicking = Some(source);
        self
    }

    fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn called_sources(&self) -> Vec<Source> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(source, _)| *source)
            .collect()
    }

    fn called_radii(&self) -> Vec<f64> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(_, radius)| *radius)
            .collect()
    }

    fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    async fn lookup(
        &self,
        source: Source,
        query: &SourceQuery,
    ) -> Result<Vec<Restaurant>, SearchError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((source, query.radius_km));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.panicking == Some(source) {
            panic!("scripted panic in {source} lookup");
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(source) {
            return Err(SearchError::Source(format!("{source} lookup failed")));
        }
        Ok(self.results.get(&source).cloned().unwrap_or_default())
    }
}

impl RestaurantFinder for ScriptedFinder {
    async fn find_nearby(
        &self,
        _point: GeoPoint,
        _time: NaiveTime,
        radius_km: f64,
    ) -> Result<Vec<Restaurant>, SearchError> {
        self.nearby_radii
            .lock()
            .expect("radii lock")
            .push(radius_km);
        Ok(self.nearby.clone())
    }

    async fn find_by_name(&self, query: &SourceQuery) -> Result<Vec<Restaurant>, SearchError> {
        self.lookup(Source::Name, query).await
    }

    async fn find_by_attribute(
        &self,
        query: &SourceQuery,
    ) -> Result<Vec<Restaurant>, SearchError> {
        self.lookup(Source::Attribute, query).await
    }

    async fn find_by_item_name(
        &self,
        query: &SourceQuery,
    ) -> Result<Vec<Restaurant>, SearchError> {
        self.lookup(Source::ItemName, query).await
    }

    async fn find_by_item_attribute(
        &self,
        query: &SourceQuery,
    ) -> Result<Vec<Restaurant>, SearchError> {
        self.lookup(Source::ItemAttribute, query).await
    }
}

fn aggregator(finder: &Arc<ScriptedFinder>) -> SearchAggregator<ScriptedFinder> {
    SearchAggregator::new(Arc::clone(finder), SearchConfig::default()).expect("valid config")
}

fn overlap_finder() -> ScriptedFinder {
    ScriptedFinder::new()
        .with(Source::Name, vec![restaurant("A", "X")])
        .with(
            Source::Attribute,
            vec![restaurant("A", "Y"), restaurant("B", "")],
        )
}

// ── Sequential path ─────────────────────────────────────────────────────────

#[tokio::test]
async fn sequential_overlap_keeps_name_source_copy() {
    let finder = Arc::new(overlap_finder());
    let results = aggregator(&finder)
        .search(&query("x"), at(12, 0, 0))
        .await
        .expect("search");

    assert_eq!(results, vec![restaurant("A", "X"), restaurant("B", "")]);
}

#[tokio::test]
async fn sequential_queries_all_four_sources_in_order() {
    let finder = Arc::new(overlap_finder());
    aggregator(&finder)
        .search(&query("x"), at(12, 0, 0))
        .await
        .expect("search");

    assert_eq!(
        finder.called_sources(),
        vec![
            Source::Name,
            Source::Attribute,
            Source::ItemName,
            Source::ItemAttribute
        ]
    );
}

#[tokio::test]
async fn sequential_order_is_first_seen_across_sources() {
    let finder = Arc::new(
        ScriptedFinder::new()
            .with(Source::Name, vec![restaurant("3", "n3"), restaurant("1", "n1")])
            .with(Source::Attribute, vec![restaurant("2", "a2"), restaurant("3", "a3")])
            .with(Source::ItemName, vec![restaurant("4", "i4"), restaurant("1", "i1")])
            .with(
                Source::ItemAttribute,
                vec![restaurant("2", "x2"), restaurant("5", "x5")],
            ),
    );
    let results = aggregator(&finder)
        .search(&query("paneer"), at(15, 0, 0))
        .await
        .expect("search");

    assert_eq!(ids(&results), vec!["3", "1", "2", "4", "5"]);
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["n3", "n1", "a2", "i4", "x5"]);
}

#[tokio::test]
async fn sequential_runs_redundant_sources() {
    let same = vec![restaurant("A", "")];
    let finder = Arc::new(
        ScriptedFinder::new()
            .with(Source::Name, same.clone())
            .with(Source::Attribute, same.clone())
            .with(Source::ItemName, same.clone())
            .with(Source::ItemAttribute, same),
    );
    let results = aggregator(&finder)
        .search(&query("a"), at(12, 0, 0))
        .await
        .expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(finder.called_sources().len(), 4);
}

#[tokio::test]
async fn sequential_failure_propagates() {
    let finder = Arc::new(overlap_finder().failing(Source::ItemName));
    let result = aggregator(&finder).search(&query("x"), at(12, 0, 0)).await;

    let err = result.unwrap_err();
    assert!(matches!(err, SearchError::Source(_)));
    assert!(err.to_string().contains("item_name"));
}

#[tokio::test]
async fn sequential_uses_range_policy_radius() {
    let finder = Arc::new(overlap_finder());
    let aggregator = aggregator(&finder);

    aggregator.search(&query("x"), at(8, 0, 0)).await.expect("peak");
    aggregator.search(&query("x"), at(7, 59, 59)).await.expect("boundary");

    let radii = finder.called_radii();
    assert_eq!(radii.len(), 8);
    assert!(radii[..4].iter().all(|r| (r - 3.0).abs() < f64::EPSILON));
    assert!(radii[4..].iter().all(|r| (r - 5.0).abs() < f64::EPSILON));
}

// ── Concurrent path ─────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_overlap_keeps_attribute_source_copy() {
    let finder = Arc::new(overlap_finder());
    let results = aggregator(&finder)
        .search_concurrent(&query("x"), at(12, 0, 0))
        .await;

    assert_eq!(results.len(), 2);
    let a = results.iter().find(|r| r.id == "A").expect("A present");
    assert_eq!(a.name, "Y");
    assert!(results.iter().any(|r| r.id == "B"));
}

#[tokio::test]
async fn concurrent_results_have_no_duplicates() {
    let finder = Arc::new(
        ScriptedFinder::new()
            .with(
                Source::Name,
                vec![restaurant("1", ""), restaurant("2", ""), restaurant("1", "")],
            )
            .with(
                Source::Attribute,
                vec![restaurant("2", ""), restaurant("3", "")],
            ),
    );
    let results = aggregator(&finder)
        .search_concurrent(&query("x"), at(12, 0, 0))
        .await;

    let unique: HashSet<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(results.len(), 3);
    assert_eq!(unique.len(), 3);
}

#[tokio::test]
async fn concurrent_queries_only_default_sources() {
    let finder = Arc::new(
        overlap_finder().with(Source::ItemName, vec![restaurant("C", "")]),
    );
    let results = aggregator(&finder)
        .search_concurrent(&query("x"), at(12, 0, 0))
        .await;

    let mut called = finder.called_sources();
    called.sort_by_key(|s| s.name());
    assert_eq!(called, vec![Source::Attribute, Source::Name]);
    assert!(!results.iter().any(|r| r.id == "C"));
}

#[tokio::test]
async fn concurrent_honours_configured_sources() {
    let finder = Arc::new(
        overlap_finder().with(Source::ItemName, vec![restaurant("A", "Z")]),
    );
    let config = SearchConfig {
        concurrent_sources: vec![Source::Name, Source::Attribute, Source::ItemName],
        ..Default::default()
    };
    let aggregator = SearchAggregator::new(Arc::clone(&finder), config).expect("valid config");
    let results = aggregator.search_concurrent(&query("x"), at(12, 0, 0)).await;

    assert_eq!(finder.called_sources().len(), 3);
    let a = results.iter().find(|r| r.id == "A").expect("A present");
    assert_eq!(a.name, "Z");
}

#[tokio::test]
async fn concurrent_failure_returns_empty() {
    for source in [Source::Name, Source::Attribute] {
        let finder = Arc::new(overlap_finder().failing(source));
        let results = aggregator(&finder)
            .search_concurrent(&query("x"), at(12, 0, 0))
            .await;
        assert!(results.is_empty(), "failure in {source} should discard results");
    }
}

#[tokio::test]
async fn concurrent_panic_returns_empty() {
    let finder = Arc::new(overlap_finder().panicking(Source::Attribute));
    let results = aggregator(&finder)
        .search_concurrent(&query("x"), at(12, 0, 0))
        .await;

    assert!(results.is_empty());
}

#[tokio::test(start_paused = true)]
async fn concurrent_timeout_returns_empty_and_aborts_lookups() {
    let finder = Arc::new(overlap_finder().latency(Duration::from_secs(30)));
    let config = SearchConfig {
        timeout_seconds: 1,
        ..Default::default()
    };
    let aggregator = SearchAggregator::new(Arc::clone(&finder), config).expect("valid config");

    let start = tokio::time::Instant::now();
    let results = aggregator.search_concurrent(&query("x"), at(12, 0, 0)).await;
    let elapsed = start.elapsed();

    assert!(results.is_empty());
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(finder.completed(), 0, "aborted lookups must not complete");
}

#[tokio::test(start_paused = true)]
async fn concurrent_cancellation_returns_empty_and_aborts_lookups() {
    let finder = Arc::new(overlap_finder().latency(Duration::from_secs(5)));
    let aggregator = aggregator(&finder);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let results = aggregator
        .search_concurrent_with_cancel(&query("x"), at(12, 0, 0), &cancel)
        .await;

    assert!(results.is_empty());
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(finder.completed(), 0, "cancelled lookups must not complete");
}

#[tokio::test(start_paused = true)]
async fn dropping_the_search_aborts_lookups() {
    let finder = Arc::new(overlap_finder().latency(Duration::from_secs(5)));
    let aggregator = aggregator(&finder);

    let abandoned = tokio::time::timeout(
        Duration::from_millis(100),
        aggregator.search_concurrent(&query("x"), at(12, 0, 0)),
    )
    .await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(finder.called_sources().len(), 2);
    assert_eq!(finder.completed(), 0);
}

#[tokio::test(start_paused = true)]
async fn concurrent_is_at_least_one_and_a_half_times_faster() {
    let finder = Arc::new(overlap_finder().latency(Duration::from_millis(200)));
    let aggregator = aggregator(&finder);
    let q = query("x");

    let start = tokio::time::Instant::now();
    let sequential = aggregator.search(&q, at(12, 0, 0)).await.expect("search");
    let sequential_elapsed = start.elapsed();

    let start = tokio::time::Instant::now();
    let concurrent = aggregator.search_concurrent(&q, at(12, 0, 0)).await;
    let concurrent_elapsed = start.elapsed();

    assert_eq!(sequential.len(), 2);
    assert_eq!(concurrent.len(), 2);
    assert!(
        sequential_elapsed.as_secs_f64() >= 1.5 * concurrent_elapsed.as_secs_f64(),
        "sequential {sequential_elapsed:?} vs concurrent {concurrent_elapsed:?}"
    );
}

// ── Empty query and nearby ──────────────────────────────────────────────────

#[tokio::test]
async fn empty_query_calls_no_source() {
    let finder = Arc::new(overlap_finder());
    let aggregator = aggregator(&finder);

    let sequential = aggregator.search(&query(""), at(12, 0, 0)).await.expect("search");
    let concurrent = aggregator.search_concurrent(&query(""), at(12, 0, 0)).await;

    assert!(sequential.is_empty());
    assert!(concurrent.is_empty());
    assert!(finder.called_sources().is_empty());
}

#[tokio::test]
async fn nearby_uses_coarse_policy() {
    let finder = Arc::new(ScriptedFinder::new().with_nearby(vec![restaurant("N", "near")]));
    let aggregator = aggregator(&finder);
    let point = GeoPoint::new(12.9, 77.6);

    let results = aggregator
        .find_nearby(point, at(9, 30, 0))
        .await
        .expect("nearby");
    assert_eq!(ids(&results), vec!["N"]);

    aggregator.find_nearby(point, at(11, 0, 0)).await.expect("nearby");
    aggregator.find_nearby(point, at(21, 0, 0)).await.expect("nearby");
    aggregator.find_nearby(point, at(21, 0, 1)).await.expect("nearby");
    // Just inside the range policy's morning window, but still hour 7.
    let half_second = NaiveTime::from_hms_milli_opt(7, 59, 59, 500).expect("valid time");
    aggregator.find_nearby(point, half_second).await.expect("nearby");

    let radii = finder.nearby_radii.lock().expect("radii lock").clone();
    assert_eq!(radii, vec![3.0, 5.0, 3.0, 5.0, 5.0]);
}
