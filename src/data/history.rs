//! Per-refresh history for the header trend sparkline.

use std::collections::VecDeque;
use std::time::Instant;

use super::stats::Statistics;

/// Maximum number of refresh cycles to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks displayed totals across refresh cycles.
///
/// In-memory only and bounded; this is the single-session trend data behind
/// the header sparkline, not a persistent event store.
#[derive(Debug, Clone, Default)]
pub struct History {
    totals: VecDeque<usize>,
    significant: VecDeque<usize>,
    timestamps: VecDeque<Instant>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the statistics of one refresh cycle.
    pub fn record(&mut self, stats: &Statistics) {
        self.totals.push_back(stats.total);
        self.significant.push_back(stats.significant_count);
        self.timestamps.push_back(Instant::now());

        while self.totals.len() > MAX_HISTORY_SIZE {
            self.totals.pop_front();
        }
        while self.significant.len() > MAX_HISTORY_SIZE {
            self.significant.pop_front();
        }
        while self.timestamps.len() > MAX_HISTORY_SIZE {
            self.timestamps.pop_front();
        }
    }

    /// Number of recorded refresh cycles.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Get sparkline data for displayed totals, normalized to 0-7.
    ///
    /// Returns an empty Vec until at least two cycles have been recorded.
    pub fn totals_sparkline(&self) -> Vec<u8> {
        if self.totals.len() < 2 {
            return Vec::new();
        }

        let max = self.totals.iter().copied().max().unwrap_or(0);
        let min = self.totals.iter().copied().min().unwrap_or(0);
        let range = (max - min).max(1) as f64;

        self.totals
            .iter()
            .map(|&v| {
                let normalized = ((v - min) as f64 / range * 7.0) as u8;
                normalized.min(7)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: usize, significant: usize) -> Statistics {
        Statistics {
            total,
            significant_count: significant,
            ..Statistics::default()
        }
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        for i in 0..200 {
            history.record(&stats(i, 0));
        }
        assert_eq!(history.len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_sparkline_needs_two_cycles() {
        let mut history = History::new();
        assert!(history.totals_sparkline().is_empty());
        history.record(&stats(10, 1));
        assert!(history.totals_sparkline().is_empty());
        history.record(&stats(20, 2));
        assert_eq!(history.totals_sparkline().len(), 2);
    }

    #[test]
    fn test_sparkline_normalization() {
        let mut history = History::new();
        history.record(&stats(0, 0));
        history.record(&stats(100, 0));
        let spark = history.totals_sparkline();
        assert_eq!(spark.first(), Some(&0));
        assert_eq!(spark.last(), Some(&7));
    }

    #[test]
    fn test_sparkline_flat_series() {
        let mut history = History::new();
        history.record(&stats(5, 0));
        history.record(&stats(5, 0));
        history.record(&stats(5, 0));
        assert!(history.totals_sparkline().iter().all(|&v| v == 0));
    }
}
