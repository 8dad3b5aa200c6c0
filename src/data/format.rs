use std::time::Duration;

use chrono::{DateTime, Utc};

/// Format a magnitude for display, with a dash for absent values.
pub fn format_magnitude(magnitude: Option<f64>) -> String {
    match magnitude {
        Some(m) => format!("{:.1}", m),
        None => "-".to_string(),
    }
}

/// Format an elapsed duration coarsely, e.g. "12s", "3m 05s", "1h 04m".
pub fn format_age(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Format an event occurrence time as a compact UTC timestamp.
pub fn format_event_time(time: DateTime<Utc>) -> String {
    time.format("%m-%d %H:%M:%S").to_string()
}
