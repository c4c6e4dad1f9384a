//! Peak-hour classification and serving-radius selection.
//!
//! Two peak-hour definitions are in use and they disagree at a handful of
//! timestamps, so both are kept as named policies:
//!
//! - [`PeakPolicy::Coarse`] compares clock fields and serves the nearby
//!   listing.
//! - [`PeakPolicy::Range`] tests open time intervals and serves every
//!   text search.
//!
//! For example 10:00:01 is off-peak under both, while 07:59:59.5 is
//! off-peak under `Coarse` and peak under `Range`.

use chrono::{NaiveTime, Timelike};

use crate::config::SearchConfig;

/// Open intervals `(start, end)` as `(h, m, s)` pairs; both ends excluded.
const PEAK_RANGES: [((u32, u32, u32), (u32, u32, u32)); 3] = [
    ((7, 59, 59), (10, 0, 1)),
    ((12, 59, 59), (14, 0, 1)),
    ((18, 59, 59), (21, 0, 1)),
];

/// Which peak-hour definition to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakPolicy {
    /// Peak for the whole of hours 8, 9, 13, 19 and 20, plus the exact
    /// instants 10:00:00, 14:00:00 and 21:00:00.
    Coarse,
    /// Peak strictly inside (07:59:59, 10:00:01), (12:59:59, 14:00:01)
    /// and (18:59:59, 21:00:01).
    Range,
}

/// The radius chosen for a clock time and whether it was a peak time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServingRadius {
    pub radius_km: f64,
    pub is_peak: bool,
}

impl PeakPolicy {
    /// Returns `true` if `time` is a peak time under this policy.
    pub fn is_peak(self, time: NaiveTime) -> bool {
        match self {
            Self::Coarse => is_peak_coarse(time),
            Self::Range => is_peak_range(time),
        }
    }

    /// Picks the serving radius for `time` from `config`'s two radii.
    pub fn radius_for(self, time: NaiveTime, config: &SearchConfig) -> ServingRadius {
        let is_peak = self.is_peak(time);
        let radius_km = if is_peak {
            config.peak_radius_km
        } else {
            config.off_peak_radius_km
        };
        ServingRadius { radius_km, is_peak }
    }
}

fn is_peak_coarse(time: NaiveTime) -> bool {
    let on_the_hour = time.minute() == 0 && time.second() == 0;
    match time.hour() {
        8 | 9 | 13 | 19 | 20 => true,
        10 | 14 | 21 => on_the_hour,
        _ => false,
    }
}

fn is_peak_range(time: NaiveTime) -> bool {
    PEAK_RANGES.iter().any(|&(start, end)| {
        match (hms(start), hms(end)) {
            (Some(start), Some(end)) => time > start && time < end,
            _ => false,
        }
    })
}

fn hms((h, m, s): (u32, u32, u32)) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, s)
}
