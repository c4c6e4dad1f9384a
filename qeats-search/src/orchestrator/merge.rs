//! Result deduplication by restaurant id.
//!
//! The two search paths merge with opposite precedence:
//!
//! - [`merge_first_wins`] keeps the first copy of each restaurant and
//!   preserves first-seen order. Used by the sequential path.
//! - [`merge_last_wins`] keeps the last copy of each restaurant and makes
//!   no ordering promise. Used by the concurrent path.
//!
//! Callers that switch between paths must not rely on which source's
//! fields survive for a restaurant found by several sources.

use std::collections::{HashMap, HashSet};

use crate::types::Restaurant;

/// Merge result lists in order, keeping the first occurrence of each id.
///
/// The output order is the first-seen order across `lists` concatenated.
pub fn merge_first_wins<I>(lists: I) -> Vec<Restaurant>
where
    I: IntoIterator<Item = Vec<Restaurant>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();

    for list in lists {
        for restaurant in list {
            if seen.insert(restaurant.id.clone()) {
                merged.push(restaurant);
            }
        }
    }

    merged
}

/// Merge result lists in order, letting later lists overwrite earlier
/// entries with the same id.
///
/// The output order is **not** guaranteed.
pub fn merge_last_wins<I>(lists: I) -> Vec<Restaurant>
where
    I: IntoIterator<Item = Vec<Restaurant>>,
{
    let mut by_id: HashMap<String, Restaurant> = HashMap::new();

    for list in lists {
        for restaurant in list {
            by_id.insert(restaurant.id.clone(), restaurant);
        }
    }

    by_id.into_values().collect()
}
