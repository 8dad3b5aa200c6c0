//! Terminal rendering using ratatui.
//!
//! Views: [`overview`] (statistics panel) and [`events`] (sortable table),
//! with shared chrome in [`common`], the event modal in [`detail`], and
//! color schemes in [`theme`].

pub mod common;
pub mod detail;
pub mod events;
pub mod overview;
pub mod theme;

pub use events::SortColumn;
pub use theme::Theme;
