//! Feed source abstraction for receiving earthquake events.
//!
//! This module provides a trait-based abstraction over where feed documents
//! come from - the live USGS HTTP endpoints, a local GeoJSON file, or an
//! in-process channel for embedding and tests.

mod channel;
mod document;
mod file;
mod http;

pub use channel::ChannelSource;
pub use document::{FeedDocument, FeedMetadata, Feature, FeatureProperties, Geometry};
pub use http::{fetch_document, HttpSource, REFRESH_INTERVAL};

pub use file::FileSource;

use std::fmt::Debug;

use thiserror::Error;

use crate::data::{Event, Timeframe};

/// Errors a fetch can fail with.
///
/// All three collapse to a single "failed to load" indicator in the UI; the
/// distinction matters for logs and for tests.
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(String),
    #[error("feed returned status {0}")]
    Status(u16),
    #[error("malformed feed payload: {0}")]
    Malformed(String),
}

/// The parsed body of one successful fetch.
#[derive(Debug, Clone, Default)]
pub struct FeedPayload {
    pub events: Vec<Event>,
    pub title: Option<String>,
}

/// The result of one completed fetch, tagged with the timeframe that was
/// active when the fetch was dispatched.
///
/// The application discards outcomes whose tag no longer matches the active
/// timeframe, so a slow in-flight fetch cannot clobber a newer selection.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub timeframe: Timeframe,
    pub result: Result<FeedPayload, FeedError>,
}

/// Trait for receiving feed data from various sources.
///
/// # Example
///
/// ```
/// use quakewatch::{FeedSource, FileSource};
/// use quakewatch::data::Timeframe;
///
/// let mut source = FileSource::new("feed.geojson", Timeframe::Day);
/// if let Some(outcome) = source.poll() {
///     println!("fetched for {:?}", outcome.timeframe);
/// }
/// ```
pub trait FeedSource: Send + Debug {
    /// Poll for a completed fetch.
    ///
    /// Returns `Some(outcome)` if a fetch has completed since the last poll,
    /// `None` otherwise. This method must be non-blocking.
    fn poll(&mut self) -> Option<FetchOutcome>;

    /// Change the active timeframe. Triggers an immediate re-fetch.
    fn select(&mut self, timeframe: Timeframe);

    /// Request an immediate re-fetch of the current timeframe.
    fn refresh(&mut self);

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
