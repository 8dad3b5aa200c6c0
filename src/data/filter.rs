//! Magnitude range filtering of feed events.

use super::event::{Event, Timeframe};

/// Lowest selectable magnitude bound.
pub const MAG_FLOOR: f64 = 0.0;
/// Highest selectable magnitude bound.
pub const MAG_CEIL: f64 = 10.0;
/// Step used by the interactive min/max controls.
pub const MAG_STEP: f64 = 0.1;

/// User-owned filter inputs: the active timeframe and the magnitude range.
///
/// Invariant: `MAG_FLOOR <= min_magnitude <= max_magnitude <= MAG_CEIL`.
/// The step mutators keep the invariant; constructing via [`FilterState::new`]
/// clamps out-of-range bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub timeframe: Timeframe,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::Day,
            min_magnitude: MAG_FLOOR,
            max_magnitude: MAG_CEIL,
        }
    }
}

impl FilterState {
    /// Create a filter state, clamping both bounds into `[MAG_FLOOR, MAG_CEIL]`
    /// and ordering them so that min <= max.
    pub fn new(timeframe: Timeframe, min_magnitude: f64, max_magnitude: f64) -> Self {
        let min = min_magnitude.clamp(MAG_FLOOR, MAG_CEIL);
        let max = max_magnitude.clamp(MAG_FLOOR, MAG_CEIL);
        Self {
            timeframe,
            min_magnitude: min.min(max),
            max_magnitude: max.max(min),
        }
    }

    /// Raise the minimum bound by one step, up to the maximum bound.
    pub fn raise_min(&mut self) {
        self.min_magnitude = round_step(self.min_magnitude + MAG_STEP).min(self.max_magnitude);
    }

    /// Lower the minimum bound by one step, down to the floor.
    pub fn lower_min(&mut self) {
        self.min_magnitude = round_step(self.min_magnitude - MAG_STEP).max(MAG_FLOOR);
    }

    /// Raise the maximum bound by one step, up to the ceiling.
    pub fn raise_max(&mut self) {
        self.max_magnitude = round_step(self.max_magnitude + MAG_STEP).min(MAG_CEIL);
    }

    /// Lower the maximum bound by one step, down to the minimum bound.
    pub fn lower_max(&mut self) {
        self.max_magnitude = round_step(self.max_magnitude - MAG_STEP).max(self.min_magnitude);
    }
}

/// Round to one decimal to keep the 0.1 steps from accumulating float drift.
fn round_step(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Select the events whose magnitude is present and inside `[min, max]`.
///
/// Events with an absent magnitude are always excluded, independent of the
/// range. Input order is preserved; no re-sort happens here.
pub fn filter_events(events: &[Event], min: f64, max: f64) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.magnitude.is_some_and(|m| m >= min && m <= max))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(id: &str, magnitude: Option<f64>) -> Event {
        Event {
            id: id.to_string(),
            magnitude,
            place: Some("10 km N of Somewhere".to_string()),
            time: Utc::now(),
            tsunami: false,
            longitude: -120.0,
            latitude: 36.0,
            depth_km: 8.0,
        }
    }

    #[test]
    fn test_filter_includes_only_in_range_present_magnitudes() {
        let events = vec![
            event("1", Some(6.2)),
            event("2", None),
            event("3", Some(4.8)),
            event("4", Some(5.0)),
        ];

        let filtered = filter_events(&events, 0.0, 10.0);
        let ids: Vec<&str> = filtered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_filter_narrow_range() {
        let events = vec![
            event("1", Some(6.2)),
            event("2", None),
            event("3", Some(4.8)),
            event("4", Some(5.0)),
        ];

        let filtered = filter_events(&events, 5.0, 10.0);
        let ids: Vec<&str> = filtered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let events = vec![event("1", Some(3.1)), event("2", Some(7.4)), event("3", None)];
        let once = filter_events(&events, 2.0, 8.0);
        let twice = filter_events(&once, 2.0, 8.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_preserves_order_and_shrinks() {
        let events = vec![
            event("b", Some(2.0)),
            event("a", Some(9.0)),
            event("c", Some(1.0)),
        ];
        let filtered = filter_events(&events, 0.0, 3.0);
        assert!(filtered.len() <= events.len());
        let ids: Vec<&str> = filtered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_filter_empty_input() {
        assert!(filter_events(&[], 0.0, 10.0).is_empty());
    }

    #[test]
    fn test_filter_equal_bounds_matches_exact_only() {
        let events = vec![event("1", Some(5.0)), event("2", Some(5.01)), event("3", Some(4.99))];
        let filtered = filter_events(&events, 5.0, 5.0);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn test_filter_state_new_clamps_and_orders() {
        let state = FilterState::new(Timeframe::Week, 12.0, -3.0);
        assert_eq!(state.min_magnitude, 0.0);
        assert_eq!(state.max_magnitude, 10.0);
        assert!(state.min_magnitude <= state.max_magnitude);
    }

    #[test]
    fn test_filter_state_step_mutators_hold_invariant() {
        let mut state = FilterState::new(Timeframe::Day, 4.9, 5.0);
        state.raise_min();
        assert_eq!(state.min_magnitude, 5.0);
        state.raise_min();
        assert_eq!(state.min_magnitude, 5.0); // pinned at max

        state.lower_max();
        assert_eq!(state.max_magnitude, 5.0); // pinned at min

        let mut state = FilterState::default();
        state.lower_min();
        assert_eq!(state.min_magnitude, 0.0);
        state.raise_max();
        assert_eq!(state.max_magnitude, 10.0);
    }
}
