//! Application state and navigation logic.

use std::time::Instant;

use anyhow::Result;

use crate::data::{
    aggregate, filter_events, Event, FeedSnapshot, FilterState, History, Statistics, Timeframe,
};
use crate::source::{FeedSource, FetchOutcome};
use crate::ui::events::SortColumn;
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Event detail is shown as an overlay (controlled by `App::show_detail_overlay`)
/// rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Summary statistics and the strongest recent events.
    Overview,
    /// Full sortable table of filtered events.
    Events,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Events,
            View::Events => View::Overview,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Events => "Events",
        }
    }
}

/// Main application state.
///
/// The snapshot and the filter are the only two inputs of the dataflow; the
/// filtered subset and statistics are derived from them in [`App::recompute`]
/// whenever either changes, never anywhere else.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Feed source
    source: Box<dyn FeedSource>,
    pub filter: FilterState,
    pub snapshot: Option<FeedSnapshot>,
    pub load_error: Option<String>,

    // Derived state, recomputed on every snapshot or filter change
    pub filtered: Vec<Event>,
    pub stats: Statistics,
    pub history: History,

    // Navigation state
    pub selected_index: usize,

    // Sorting (Events view)
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    // Search on place text
    pub search_text: String,
    pub search_active: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given feed source and filter state.
    pub fn new(source: Box<dyn FeedSource>, filter: FilterState) -> Self {
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            show_detail_overlay: false,
            source,
            filter,
            snapshot: None,
            load_error: None,
            filtered: Vec::new(),
            stats: Statistics::default(),
            history: History::new(),
            selected_index: 0,
            sort_column: SortColumn::default(),
            sort_ascending: false, // newest/strongest first by default
            search_text: String::new(),
            search_active: false,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current feed source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// True until the first fetch has either succeeded or failed.
    pub fn is_loading(&self) -> bool {
        self.snapshot.is_none() && self.load_error.is_none()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Drain completed fetches from the source and apply them.
    ///
    /// Returns true if the displayed snapshot changed.
    pub fn poll_feed(&mut self) -> bool {
        let mut updated = false;
        while let Some(outcome) = self.source.poll() {
            updated |= self.apply_outcome(outcome);
        }
        updated
    }

    /// Apply one completed fetch.
    ///
    /// An outcome whose timeframe tag no longer matches the active selection
    /// is discarded: it was dispatched for a timeframe the user has left.
    /// A failure keeps the previous snapshot visible and raises the error
    /// indicator; the derived subset and statistics stay untouched.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.timeframe != self.filter.timeframe {
            return false;
        }

        match outcome.result {
            Ok(payload) => {
                self.snapshot = Some(FeedSnapshot::new(
                    outcome.timeframe,
                    payload.events,
                    payload.title,
                ));
                self.load_error = None;
                self.recompute();
                self.history.record(&self.stats);
                true
            }
            Err(e) => {
                self.load_error = Some(e.to_string());
                false
            }
        }
    }

    /// Re-derive the filtered subset and statistics from the current
    /// snapshot/filter pair.
    fn recompute(&mut self) {
        let events: &[Event] = self.snapshot.as_ref().map(|s| s.events.as_slice()).unwrap_or(&[]);
        self.filtered =
            filter_events(events, self.filter.min_magnitude, self.filter.max_magnitude);
        self.stats = aggregate(&self.filtered);

        let visible = self.visible_count();
        if self.selected_index >= visible {
            self.selected_index = visible.saturating_sub(1);
        }
    }

    /// Switch the active timeframe and trigger an immediate re-fetch.
    ///
    /// The stale snapshot stays on screen until the replacement arrives.
    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        if timeframe == self.filter.timeframe {
            return;
        }
        self.filter.timeframe = timeframe;
        self.source.select(timeframe);
        self.set_status_message(format!("Fetching {}...", timeframe.label()));
    }

    /// Cycle to the next timeframe.
    pub fn next_timeframe(&mut self) {
        self.set_timeframe(self.filter.timeframe.next());
    }

    /// Cycle to the previous timeframe.
    pub fn prev_timeframe(&mut self) {
        self.set_timeframe(self.filter.timeframe.prev());
    }

    /// Request an immediate re-fetch of the current timeframe.
    pub fn refresh(&mut self) {
        self.source.refresh();
        self.set_status_message("Refreshing...".to_string());
    }

    pub fn raise_min_magnitude(&mut self) {
        self.filter.raise_min();
        self.recompute();
    }

    pub fn lower_min_magnitude(&mut self) {
        self.filter.lower_min();
        self.recompute();
    }

    pub fn raise_max_magnitude(&mut self) {
        self.filter.raise_max();
        self.recompute();
    }

    pub fn lower_max_magnitude(&mut self) {
        self.filter.lower_max();
        self.recompute();
    }

    /// The filtered events that pass the place search, in feed order,
    /// paired with their raw index into `filtered`.
    pub fn searched_events(&self) -> Vec<(usize, &Event)> {
        self.filtered
            .iter()
            .enumerate()
            .filter(|(_, e)| self.matches_search(e))
            .collect()
    }

    /// The events currently visible in the Events view: searched, then sorted.
    pub fn visible_events(&self) -> Vec<(usize, &Event)> {
        let mut events = self.searched_events();
        crate::ui::events::sort_events_by(&mut events, self.sort_column, self.sort_ascending);
        events
    }

    fn visible_count(&self) -> usize {
        self.searched_events().len()
    }

    /// The event behind the current selection, if any.
    pub fn selected_event(&self) -> Option<&Event> {
        let visible = self.visible_events();
        visible.get(self.selected_index).map(|(_, e)| *e)
    }

    /// Check if an event matches the current search text.
    pub fn matches_search(&self, event: &Event) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        event.place_label().to_lowercase().contains(&needle)
            || event.id.to_lowercase().contains(&needle)
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.visible_count().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_index = self.visible_count().saturating_sub(1);
    }

    /// Open the detail overlay for the currently selected event.
    pub fn enter_detail(&mut self) {
        if self.selected_event().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then return to Overview.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        if self.current_view != View::Overview {
            self.current_view = View::Overview;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column for the Events view.
    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    /// Enter search input mode (starts capturing keystrokes).
    pub fn start_search(&mut self) {
        self.search_active = true;
    }

    /// Exit search input mode without clearing the search text.
    pub fn cancel_search(&mut self) {
        self.search_active = false;
    }

    /// Clear the search text and exit search mode.
    pub fn clear_search(&mut self) {
        self.search_text.clear();
        self.search_active = false;
    }

    /// Append a character to the search text.
    pub fn search_push(&mut self, c: char) {
        self.search_text.push(c);
    }

    /// Remove the last character from the search text.
    pub fn search_pop(&mut self) {
        self.search_text.pop();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current filter, statistics, and filtered events to a file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        use std::io::Write;

        if self.snapshot.is_none() {
            anyhow::bail!("No data to export");
        }

        let export = serde_json::json!({
            "timeframe": self.filter.timeframe.label(),
            "min_magnitude": self.filter.min_magnitude,
            "max_magnitude": self.filter.max_magnitude,
            "statistics": self.stats,
            "events": self.filtered,
        });

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ChannelSource, FeedError, FeedPayload, FetchOutcome};
    use chrono::Utc;

    fn event(id: &str, magnitude: Option<f64>) -> Event {
        Event {
            id: id.to_string(),
            magnitude,
            place: Some(format!("near {}", id)),
            time: Utc::now(),
            tsunami: false,
            longitude: 0.0,
            latitude: 0.0,
            depth_km: 5.0,
        }
    }

    fn app_with_channel() -> (tokio::sync::watch::Sender<Option<FetchOutcome>>, App) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::new(Box::new(source), FilterState::default());
        (tx, app)
    }

    fn ok_outcome(timeframe: Timeframe, events: Vec<Event>) -> FetchOutcome {
        FetchOutcome {
            timeframe,
            result: Ok(FeedPayload { events, title: None }),
        }
    }

    #[test]
    fn test_loading_until_first_outcome() {
        let (_tx, app) = app_with_channel();
        assert!(app.is_loading());
        assert!(app.snapshot.is_none());
    }

    #[test]
    fn test_successful_fetch_derives_subset_and_stats() {
        let (_tx, mut app) = app_with_channel();
        let events = vec![
            event("1", Some(6.2)),
            event("2", None),
            event("3", Some(4.8)),
            event("4", Some(5.0)),
        ];

        assert!(app.apply_outcome(ok_outcome(Timeframe::Day, events)));
        assert!(!app.is_loading());
        assert_eq!(app.filtered.len(), 3);
        assert_eq!(app.stats.total, 3);
        assert_eq!(app.stats.significant_count, 2);
        assert_eq!(app.stats.max_magnitude, 6.2);
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_failed_fetch_retains_previous_derivation() {
        let (_tx, mut app) = app_with_channel();
        app.apply_outcome(ok_outcome(Timeframe::Day, vec![event("1", Some(6.2))]));
        let before_filtered = app.filtered.clone();
        let before_stats = app.stats;

        let failed = FetchOutcome {
            timeframe: Timeframe::Day,
            result: Err(FeedError::Status(503)),
        };
        assert!(!app.apply_outcome(failed));

        assert!(app.load_error.is_some());
        assert_eq!(app.filtered, before_filtered);
        assert_eq!(app.stats, before_stats);
        assert!(app.snapshot.is_some());
    }

    #[test]
    fn test_error_clears_on_next_success() {
        let (_tx, mut app) = app_with_channel();
        app.apply_outcome(FetchOutcome {
            timeframe: Timeframe::Day,
            result: Err(FeedError::Network("offline".to_string())),
        });
        assert!(app.load_error.is_some());
        assert!(!app.is_loading());

        app.apply_outcome(ok_outcome(Timeframe::Day, vec![event("1", Some(3.0))]));
        assert!(app.load_error.is_none());
        assert_eq!(app.stats.total, 1);
    }

    #[test]
    fn test_stale_timeframe_outcome_is_discarded() {
        let (_tx, mut app) = app_with_channel();
        app.apply_outcome(ok_outcome(Timeframe::Day, vec![event("1", Some(6.0))]));

        // User switches to Week while a Day fetch is still in flight.
        app.filter.timeframe = Timeframe::Week;

        let stale = ok_outcome(Timeframe::Day, vec![event("stale", Some(9.9))]);
        assert!(!app.apply_outcome(stale));
        assert_eq!(app.stats.max_magnitude, 6.0);

        // The matching Week fetch lands normally.
        assert!(app.apply_outcome(ok_outcome(Timeframe::Week, vec![event("2", Some(2.0))])));
        assert_eq!(app.snapshot.as_ref().unwrap().timeframe, Timeframe::Week);
    }

    #[test]
    fn test_filter_change_recomputes_without_new_fetch() {
        let (_tx, mut app) = app_with_channel();
        app.apply_outcome(ok_outcome(
            Timeframe::Day,
            vec![event("1", Some(6.2)), event("3", Some(4.8)), event("4", Some(5.0))],
        ));
        assert_eq!(app.stats.total, 3);

        app.filter.min_magnitude = 4.9;
        app.raise_min_magnitude(); // 5.0
        assert_eq!(app.filter.min_magnitude, 5.0);
        assert_eq!(app.stats.total, 2);
        assert!((app.stats.average_magnitude - 5.6).abs() < 1e-9);
    }

    #[test]
    fn test_poll_feed_drains_channel() {
        let (tx, mut app) = app_with_channel();
        tx.send(Some(ok_outcome(Timeframe::Day, vec![event("1", Some(2.0))]))).unwrap();
        assert!(app.poll_feed());
        assert_eq!(app.stats.total, 1);
        assert!(!app.poll_feed());
    }

    #[test]
    fn test_search_narrows_visible_events() {
        let (_tx, mut app) = app_with_channel();
        app.apply_outcome(ok_outcome(
            Timeframe::Day,
            vec![event("alpha", Some(1.0)), event("beta", Some(2.0))],
        ));

        app.search_text = "beta".to_string();
        let visible = app.visible_events();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].1.id, "beta");
    }

    #[test]
    fn test_selection_clamps_on_shrink() {
        let (_tx, mut app) = app_with_channel();
        app.apply_outcome(ok_outcome(
            Timeframe::Day,
            vec![event("1", Some(1.0)), event("2", Some(2.0)), event("3", Some(3.0))],
        ));
        app.select_last();
        assert_eq!(app.selected_index, 2);

        app.apply_outcome(ok_outcome(Timeframe::Day, vec![event("1", Some(1.0))]));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_export_without_data_fails() {
        let (_tx, app) = app_with_channel();
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export_state(&dir.path().join("out.json")).is_err());
    }

    #[test]
    fn test_export_writes_filter_stats_and_events() {
        let (_tx, mut app) = app_with_channel();
        app.apply_outcome(ok_outcome(Timeframe::Day, vec![event("1", Some(6.2))]));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        app.export_state(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["timeframe"], "past day");
        assert_eq!(value["statistics"]["total"], 1);
        assert_eq!(value["events"][0]["id"], "1");
    }
}
