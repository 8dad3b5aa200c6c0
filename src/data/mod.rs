//! Data models and derivation logic for the feed dashboard.
//!
//! This module holds the two inputs of the dataflow (the feed snapshot and
//! the user's filter state) and the pure functions that derive the displayed
//! subset and statistics from them.
//!
//! ## Submodules
//!
//! - [`event`]: Core models ([`Event`], [`Timeframe`], [`Severity`])
//! - [`filter`]: Magnitude range state and the stable subset filter
//! - [`stats`]: Summary statistics ([`Statistics`], [`aggregate`])
//! - [`snapshot`]: The raw collection from the last successful fetch
//! - [`history`]: Per-refresh totals for the header sparkline
//! - [`format`]: Display formatting helpers
//!
//! ## Data flow
//!
//! ```text
//! FeedSnapshot ──┐
//!                ├──▶ filter_events() ──▶ subset ──▶ aggregate() ──▶ Statistics
//! FilterState ───┘
//! ```

pub mod event;
pub mod filter;
pub mod format;
pub mod history;
pub mod snapshot;
pub mod stats;

pub use event::{Event, Severity, Timeframe, MAJOR_MAGNITUDE, SIGNIFICANT_MAGNITUDE};
pub use filter::{filter_events, FilterState, MAG_CEIL, MAG_FLOOR, MAG_STEP};
pub use history::History;
pub use snapshot::FeedSnapshot;
pub use stats::{aggregate, Statistics};
