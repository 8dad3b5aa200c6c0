//! Overview view rendering.
//!
//! Displays the summary statistics panel, a magnitude distribution bar, and
//! the strongest events in the filtered subset.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::format::{format_event_time, format_magnitude};
use crate::data::Event;

/// How many of the strongest events to list.
const STRONGEST_LIMIT: usize = 8;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.snapshot.is_none() {
        render_waiting(frame, app, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(8), // Statistics panel
        Constraint::Min(6),    // Strongest events
    ])
    .split(area);

    render_statistics(frame, app, chunks[0]);
    render_strongest(frame, app, chunks[1]);
}

fn render_waiting(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Overview ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let message = if app.load_error.is_some() {
        "  Feed unavailable. Retrying on the next poll cycle."
    } else {
        "  Waiting for the first feed snapshot..."
    };

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().add_modifier(Modifier::DIM))),
    ])
    .block(block);
    frame.render_widget(paragraph, area);
}

fn render_statistics(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.stats;

    let columns = Layout::horizontal([
        Constraint::Percentage(50), // Numbers
        Constraint::Percentage(50), // Distribution
    ])
    .split(area);

    let value_style = Style::default().add_modifier(Modifier::BOLD);
    let significant_style = if stats.significant_count > 0 {
        Style::default().fg(app.theme.significant).add_modifier(Modifier::BOLD)
    } else {
        value_style
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Events shown      "),
            Span::styled(format!("{}", stats.total), value_style),
        ]),
        Line::from(vec![
            Span::raw("  Average magnitude "),
            Span::styled(format!("{:.2}", stats.average_magnitude), value_style),
        ]),
        Line::from(vec![
            Span::raw("  Max magnitude     "),
            Span::styled(format!("{:.1}", stats.max_magnitude), value_style),
        ]),
        Line::from(vec![
            Span::raw("  Significant (5+)  "),
            Span::styled(format!("{}", stats.significant_count), significant_style),
        ]),
    ];

    let title = format!(
        " Statistics ({}, M{:.1}-{:.1}) ",
        app.filter.timeframe.label(),
        app.filter.min_magnitude,
        app.filter.max_magnitude
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), columns[0]);

    render_distribution(frame, app, columns[1]);
}

/// Horizontal bars of event counts per whole-magnitude band.
fn render_distribution(frame: &mut Frame, app: &App, area: Rect) {
    let counts = magnitude_bands(&app.filtered);
    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);

    // Bar width leaves room for the band label and the count.
    let bar_width = area.width.saturating_sub(16) as usize;

    let mut lines = vec![Line::from("")];
    for (band, &count) in counts.iter().enumerate() {
        let filled = if count == 0 {
            0
        } else {
            ((count as f64 / max_count as f64) * bar_width as f64).ceil() as usize
        };
        let bar: String = "█".repeat(filled.min(bar_width));

        let (label, color) = match band {
            0 => ("M0+", app.theme.highlight),
            1 => ("M2+", app.theme.highlight),
            2 => ("M4+", app.theme.highlight),
            3 => ("M5+", app.theme.significant),
            _ => ("M7+", app.theme.major),
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ", label)),
            Span::styled(bar, Style::default().fg(color)),
            Span::styled(format!(" {}", count), Style::default().add_modifier(Modifier::DIM)),
        ]));
    }

    let block = Block::default()
        .title(" Magnitude distribution ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Count filtered events per whole-magnitude band (0+, 2+, 4+, 5+, 7+).
fn magnitude_bands(events: &[Event]) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for event in events {
        let Some(mag) = event.magnitude else { continue };
        let band = match mag {
            m if m >= 7.0 => 4,
            m if m >= 5.0 => 3,
            m if m >= 4.0 => 2,
            m if m >= 2.0 => 1,
            _ => 0,
        };
        counts[band] += 1;
    }
    counts
}

fn render_strongest(frame: &mut Frame, app: &App, area: Rect) {
    let mut strongest: Vec<&Event> =
        app.filtered.iter().filter(|e| e.magnitude.is_some()).collect();
    strongest.sort_by(|a, b| {
        b.magnitude
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&a.magnitude.unwrap_or(f64::NEG_INFINITY))
    });
    strongest.truncate(STRONGEST_LIMIT);

    let header = Row::new(vec![
        Cell::from("Mag"),
        Cell::from("Time (UTC)"),
        Cell::from("Place"),
        Cell::from("Class"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = strongest
        .iter()
        .map(|e| {
            let style = app.theme.severity_style(e.severity());
            Row::new(vec![
                Cell::from(format_magnitude(e.magnitude)).style(style),
                Cell::from(format_event_time(e.time)),
                Cell::from(e.place_label().to_string()),
                Cell::from(e.severity().symbol()).style(style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(15),
        Constraint::Fill(3),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" Strongest events (top {}) ", STRONGEST_LIMIT))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}
