//! Detail overlay rendering.
//!
//! Displays a modal overlay with the full record of a selected event.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::format::format_magnitude;
use crate::data::Severity;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Render the event detail as a modal overlay.
///
/// Shows the full feed record for the selected event: identifier, magnitude,
/// location, depth, occurrence time, and the tsunami flag.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(event) = app.selected_event() else {
        return;
    };

    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    let overlay_height = MIN_OVERLAY_HEIGHT.min(area.height);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Min(10),   // Event fields
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    let severity_style = app.theme.severity_style(event.severity());
    let severity_label = match event.severity() {
        Severity::Light => "light",
        Severity::Significant => "significant",
        Severity::Major => "major",
    };

    let label = Style::default().add_modifier(Modifier::DIM);
    let value = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![Span::styled(
            format!(" {} ", event.place_label()),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Magnitude   ", label),
            Span::styled(format_magnitude(event.magnitude), severity_style.add_modifier(Modifier::BOLD)),
            Span::raw("  ("),
            Span::styled(severity_label, severity_style),
            Span::raw(")"),
        ]),
        Line::from(vec![
            Span::styled(" Time        ", label),
            Span::styled(
                event.time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled(" Coordinates ", label),
            Span::styled(
                format!("{:.4}, {:.4}", event.latitude, event.longitude),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled(" Depth       ", label),
            Span::styled(format!("{:.1} km", event.depth_km), value),
        ]),
        Line::from(vec![
            Span::styled(" Feed id     ", label),
            Span::styled(event.id.clone(), value),
        ]),
    ];

    if event.tsunami {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(
            " ⚠ Tsunami flag set for this event",
            Style::default().fg(app.theme.major).add_modifier(Modifier::BOLD),
        )]));
    }

    let block = Block::default()
        .title(" Event Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[1]);
}
