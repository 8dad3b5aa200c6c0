//! Core event model: earthquake events, timeframes, and severity bands.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Magnitude at or above which an event is considered significant.
pub const SIGNIFICANT_MAGNITUDE: f64 = 5.0;

/// Magnitude at or above which an event is considered major.
pub const MAJOR_MAGNITUDE: f64 = 7.0;

/// A single earthquake event as reported by the feed.
///
/// Sourced verbatim from one feed feature and never mutated locally.
/// Magnitude may be absent for events the network has not yet reviewed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    pub magnitude: Option<f64>,
    pub place: Option<String>,
    pub time: DateTime<Utc>,
    pub tsunami: bool,
    pub longitude: f64,
    pub latitude: f64,
    pub depth_km: f64,
}

impl Event {
    /// Severity band for display styling.
    pub fn severity(&self) -> Severity {
        Severity::classify(self.magnitude)
    }

    /// Place description, or a placeholder when the feed omitted it.
    pub fn place_label(&self) -> &str {
        self.place.as_deref().unwrap_or("unknown location")
    }
}

/// The historical window used to select which feed endpoint to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Timeframe {
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

impl Timeframe {
    /// The fixed USGS summary endpoint for this timeframe.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Timeframe::Hour => {
                "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_hour.geojson"
            }
            Timeframe::Day => {
                "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson"
            }
            Timeframe::Week => {
                "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
            }
            Timeframe::Month => {
                "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson"
            }
        }
    }

    /// Returns the display label for this timeframe.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Hour => "past hour",
            Timeframe::Day => "past day",
            Timeframe::Week => "past week",
            Timeframe::Month => "past month",
        }
    }

    /// Cycle to the next timeframe.
    pub fn next(self) -> Self {
        match self {
            Timeframe::Hour => Timeframe::Day,
            Timeframe::Day => Timeframe::Week,
            Timeframe::Week => Timeframe::Month,
            Timeframe::Month => Timeframe::Hour,
        }
    }

    /// Cycle to the previous timeframe.
    pub fn prev(self) -> Self {
        match self {
            Timeframe::Hour => Timeframe::Month,
            Timeframe::Day => Timeframe::Hour,
            Timeframe::Week => Timeframe::Day,
            Timeframe::Month => Timeframe::Week,
        }
    }
}

/// Severity band for an event, derived from magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Light,
    Significant,
    Major,
}

impl Severity {
    /// Classify a magnitude into a severity band.
    ///
    /// Events with no reported magnitude are treated as light.
    pub fn classify(magnitude: Option<f64>) -> Self {
        match magnitude {
            Some(m) if m >= MAJOR_MAGNITUDE => Severity::Major,
            Some(m) if m >= SIGNIFICANT_MAGNITUDE => Severity::Significant,
            _ => Severity::Light,
        }
    }

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Light => "-",
            Severity::Significant => "SIG",
            Severity::Major => "MAJ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_per_timeframe() {
        assert!(Timeframe::Hour.endpoint().ends_with("all_hour.geojson"));
        assert!(Timeframe::Day.endpoint().ends_with("all_day.geojson"));
        assert!(Timeframe::Week.endpoint().ends_with("all_week.geojson"));
        assert!(Timeframe::Month.endpoint().ends_with("all_month.geojson"));
    }

    #[test]
    fn test_timeframe_cycle_round_trip() {
        let mut tf = Timeframe::Hour;
        for _ in 0..4 {
            tf = tf.next();
        }
        assert_eq!(tf, Timeframe::Hour);
        assert_eq!(Timeframe::Day.next().prev(), Timeframe::Day);
    }

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(Severity::classify(None), Severity::Light);
        assert_eq!(Severity::classify(Some(4.9)), Severity::Light);
        assert_eq!(Severity::classify(Some(5.0)), Severity::Significant);
        assert_eq!(Severity::classify(Some(6.9)), Severity::Significant);
        assert_eq!(Severity::classify(Some(7.0)), Severity::Major);
    }
}
