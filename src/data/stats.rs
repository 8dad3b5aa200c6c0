//! Summary statistics derived from a filtered event subset.

use serde::Serialize;

use super::event::{Event, SIGNIFICANT_MAGNITUDE};

/// Derived statistics for the currently displayed subset.
///
/// Never persisted; recomputed whenever the snapshot or the filter changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub average_magnitude: f64,
    pub max_magnitude: f64,
    pub significant_count: usize,
}

/// Compute statistics over a filtered subset.
///
/// The result depends only on the subset contents. An empty subset yields all
/// zeros. A non-empty subset with no present magnitudes cannot occur after
/// [`filter_events`](super::filter::filter_events) has run, but is still
/// handled by zeroing the magnitude fields.
pub fn aggregate(subset: &[Event]) -> Statistics {
    if subset.is_empty() {
        return Statistics::default();
    }

    let magnitudes: Vec<f64> = subset.iter().filter_map(|e| e.magnitude).collect();
    if magnitudes.is_empty() {
        return Statistics {
            total: subset.len(),
            ..Statistics::default()
        };
    }

    let sum: f64 = magnitudes.iter().sum();
    let max = magnitudes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let significant_count = magnitudes.iter().filter(|&&m| m >= SIGNIFICANT_MAGNITUDE).count();

    Statistics {
        total: subset.len(),
        average_magnitude: sum / magnitudes.len() as f64,
        max_magnitude: max,
        significant_count,
    }
}
