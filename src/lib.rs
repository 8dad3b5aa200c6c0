//! # quakewatch
//!
//! A terminal dashboard and library for monitoring USGS earthquake feed
//! activity.
//!
//! quakewatch polls one of the four USGS GeoJSON summary endpoints (past
//! hour/day/week/month), filters the reported events by a user-adjustable
//! magnitude range, and displays summary statistics alongside a scrollable
//! event table. There is no persistence: everything shown is derived from the
//! most recent snapshot held in memory.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(derivation)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource | ChannelSource    │
//! │  │ (feed)  │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and the snapshot/filter
//!   dataflow that derives the displayed subset and statistics
//! - **[`source`]**: Feed source abstraction ([`FeedSource`] trait) with
//!   implementations for the live HTTP feed, local files, and channels
//! - **[`data`]**: Domain models and the pure derivation functions
//!   ([`data::filter_events`], [`data::aggregate`])
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the live feed for the past day
//! quakewatch
//!
//! # Past week, significant events only
//! quakewatch --timeframe week --min-mag 5.0
//!
//! # Inspect a saved feed document offline
//! quakewatch --file feed.geojson
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use quakewatch::{App, FileSource};
//! use quakewatch::data::{FilterState, Timeframe};
//!
//! let source = Box::new(FileSource::new("feed.geojson", Timeframe::Day));
//! let app = App::new(source, FilterState::default());
//! ```
//!
//! ### As a library with the live feed
//!
//! ```no_run
//! use quakewatch::{App, HttpSource};
//! use quakewatch::data::{FilterState, Timeframe};
//!
//! # tokio_test::block_on(async {
//! // Spawns a background task that re-fetches every 60 seconds
//! let source = HttpSource::spawn(Timeframe::Day)?;
//! let app = App::new(Box::new(source), FilterState::default());
//! # anyhow::Ok(())
//! # });
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use quakewatch::{App, ChannelSource};
//! use quakewatch::data::FilterState;
//!
//! // Create a channel for pushing fetch outcomes
//! let (tx, source) = ChannelSource::create("embedded");
//! let app = App::new(Box::new(source), FilterState::default());
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{Event, FeedSnapshot, FilterState, Severity, Statistics, Timeframe};
pub use source::{
    ChannelSource, FeedError, FeedPayload, FeedSource, FetchOutcome, FileSource, HttpSource,
};
