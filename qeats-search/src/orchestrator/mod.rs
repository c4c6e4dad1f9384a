//! Search orchestrator: source fan-out, joining, and dedup merge.
//!
//! The sequential path queries all four sources one after another and
//! keeps the first copy of each restaurant. The concurrent path queries a
//! configured subset at once and keeps the last copy.

pub mod concurrent;
pub mod merge;
pub mod sequential;
