//! Events view rendering.
//!
//! Displays the filtered events in a sortable, searchable table.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::format::{format_event_time, format_magnitude};
use crate::data::Event;

/// Column to sort by in the Events view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Sort by occurrence time.
    #[default]
    Time,
    /// Sort by magnitude (absent magnitudes sort lowest).
    Magnitude,
    /// Sort by depth.
    Depth,
    /// Sort by place description.
    Place,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Time => SortColumn::Magnitude,
            SortColumn::Magnitude => SortColumn::Depth,
            SortColumn::Depth => SortColumn::Place,
            SortColumn::Place => SortColumn::Time,
        }
    }
}

/// Render the Events view showing all filtered events in a sortable table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.snapshot.is_none() {
        return;
    }

    let events = app.visible_events();

    let header = Row::new(vec![
        Cell::from(format_header("Time (UTC)", SortColumn::Time, app)),
        Cell::from(format_header("Mag", SortColumn::Magnitude, app)),
        Cell::from(format_header("Depth", SortColumn::Depth, app)),
        Cell::from(format_header("Place", SortColumn::Place, app)),
        Cell::from("Tsunami"),
        Cell::from("Class"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = events
        .iter()
        .map(|(_, e)| {
            let severity_style = app.theme.severity_style(e.severity());

            let tsunami_cell = if e.tsunami {
                Cell::from("TSU").style(
                    Style::default().fg(app.theme.major).add_modifier(Modifier::BOLD),
                )
            } else {
                Cell::from("-").style(Style::default().add_modifier(Modifier::DIM))
            };

            Row::new(vec![
                Cell::from(format_event_time(e.time)),
                Cell::from(format_magnitude(e.magnitude)).style(severity_style),
                Cell::from(format!("{:.0} km", e.depth_km)),
                Cell::from(e.place_label().to_string()),
                tsunami_cell,
                Cell::from(e.severity().symbol()).style(severity_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(15), // Time
        Constraint::Length(5),  // Mag
        Constraint::Length(7),  // Depth
        Constraint::Fill(3),    // Place - gets the remaining space
        Constraint::Length(8),  // Tsunami
        Constraint::Length(6),  // Class
    ];

    let selected_visual_index = app.selected_index.min(events.len().saturating_sub(1));

    let sort_indicator = match app.sort_column {
        SortColumn::Time => "time",
        SortColumn::Magnitude => "mag",
        SortColumn::Depth => "depth",
        SortColumn::Place => "place",
    };
    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    let search_info = if app.search_active {
        format!(" /{}_", app.search_text)
    } else if !app.search_text.is_empty() {
        format!(" /{}/ [c:clear]", app.search_text)
    } else {
        String::new()
    };

    let position_info = if !events.is_empty() {
        format!(" [{}/{}]", selected_visual_index + 1, events.len())
    } else {
        String::new()
    };

    let title = format!(
        " Events ({}/{}) [s:sort {}{}]{}{} ",
        events.len(),
        app.filtered.len(),
        sort_indicator,
        sort_dir,
        search_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected_visual_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// Sort events by the given column and direction (public for use in app.rs)
pub fn sort_events_by(events: &mut [(usize, &Event)], column: SortColumn, ascending: bool) {
    events.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Time => a.1.time.cmp(&b.1.time),
            SortColumn::Magnitude => {
                let a_mag = a.1.magnitude.unwrap_or(f64::NEG_INFINITY);
                let b_mag = b.1.magnitude.unwrap_or(f64::NEG_INFINITY);
                a_mag.total_cmp(&b_mag)
            }
            SortColumn::Depth => a.1.depth_km.total_cmp(&b.1.depth_km),
            SortColumn::Place => {
                a.1.place_label().to_lowercase().cmp(&b.1.place_label().to_lowercase())
            }
        };

        // Apply direction to primary comparison
        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        // Use secondary sort by id for stability when primary values are equal
        if primary == std::cmp::Ordering::Equal {
            a.1.id.cmp(&b.1.id)
        } else {
            primary
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, magnitude: Option<f64>, secs: i64, depth: f64) -> Event {
        Event {
            id: id.to_string(),
            magnitude,
            place: Some(id.to_string()),
            time: Utc.timestamp_opt(secs, 0).unwrap(),
            tsunami: false,
            longitude: 0.0,
            latitude: 0.0,
            depth_km: depth,
        }
    }

    #[test]
    fn test_sort_by_magnitude_absent_sorts_lowest() {
        let a = event("a", None, 0, 1.0);
        let b = event("b", Some(3.0), 0, 1.0);
        let c = event("c", Some(7.0), 0, 1.0);
        let mut items = vec![(0, &a), (1, &b), (2, &c)];

        sort_events_by(&mut items, SortColumn::Magnitude, true);
        let ids: Vec<&str> = items.iter().map(|(_, e)| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        sort_events_by(&mut items, SortColumn::Magnitude, false);
        let ids: Vec<&str> = items.iter().map(|(_, e)| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_by_time() {
        let a = event("a", Some(1.0), 300, 1.0);
        let b = event("b", Some(1.0), 100, 1.0);
        let mut items = vec![(0, &a), (1, &b)];

        sort_events_by(&mut items, SortColumn::Time, true);
        assert_eq!(items[0].1.id, "b");
    }

    #[test]
    fn test_sort_equal_values_are_stable_by_id() {
        let a = event("z", Some(5.0), 0, 1.0);
        let b = event("a", Some(5.0), 0, 1.0);
        let mut items = vec![(0, &a), (1, &b)];

        sort_events_by(&mut items, SortColumn::Magnitude, true);
        assert_eq!(items[0].1.id, "a");
    }

    #[test]
    fn test_sort_column_cycles() {
        let mut col = SortColumn::Time;
        for _ in 0..4 {
            col = col.next();
        }
        assert_eq!(col, SortColumn::Time);
    }
}
