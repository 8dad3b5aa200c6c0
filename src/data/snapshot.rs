//! The most recently fetched raw event collection.

use std::time::Instant;

use super::event::{Event, Timeframe};

/// The raw event collection from the last successful fetch.
///
/// Replaced wholesale on each successful refresh. A failed refresh leaves the
/// previous snapshot in place so stale data stays visible alongside the error.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Timeframe this snapshot was fetched for.
    pub timeframe: Timeframe,
    /// Events in feed order, unmodified.
    pub events: Vec<Event>,
    /// Feed title from the metadata block, when present.
    pub title: Option<String>,
    /// When the fetch completed, for the "updated Ns ago" display.
    pub fetched_at: Instant,
}

impl FeedSnapshot {
    pub fn new(timeframe: Timeframe, events: Vec<Event>, title: Option<String>) -> Self {
        Self {
            timeframe,
            events,
            title,
            fetched_at: Instant::now(),
        }
    }
}
