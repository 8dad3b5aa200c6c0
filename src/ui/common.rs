//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::format::format_age;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the header bar with feed status overview.
///
/// Displays: status indicator, timeframe, displayed/fetched counts,
/// significant count, max magnitude, and the totals trend sparkline.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if app.is_loading() {
        let line = Line::from(vec![
            Span::styled(" QUAKEWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let (status_icon, status_style) = if app.load_error.is_some() {
        ("●", Style::default().fg(app.theme.major))
    } else {
        ("●", Style::default().fg(app.theme.ok))
    };

    let fetched = app.snapshot.as_ref().map(|s| s.events.len()).unwrap_or(0);
    let sparkline = render_sparkline(&app.history.totals_sparkline());

    let line = Line::from(vec![
        Span::styled(format!(" {} ", status_icon), status_style),
        Span::styled("QUAKEWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            app.filter.timeframe.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", app.stats.total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("/{} shown │ ", fetched)),
        if app.stats.significant_count > 0 {
            Span::styled(
                format!("{} significant", app.stats.significant_count),
                Style::default().fg(app.theme.significant),
            )
        } else {
            Span::styled("0 significant", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" │ "),
        Span::raw(format!("max M{:.1}", app.stats.max_magnitude)),
        Span::raw(" │ "),
        Span::styled(sparkline, Style::default().fg(app.theme.highlight)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_sparkline(data: &[u8]) -> String {
    if data.is_empty() {
        return "        ".to_string(); // 8 spaces placeholder
    }

    // Take last 8 values
    let values: Vec<u8> = data.iter().rev().take(8).rev().copied().collect();

    values.iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Overview "), Line::from(" 2:Events ")];

    let selected = match app.current_view {
        View::Overview => 0,
        View::Events => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: source description, filter range, data age, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.load_error {
        let age = app
            .snapshot
            .as_ref()
            .map(|s| format!(" | showing data from {} ago", format_age(s.fetched_at.elapsed())))
            .unwrap_or_default();
        let paragraph = Paragraph::new(format!(" Failed to load: {}{} | r:retry q:quit ", err, age))
            .style(Style::default().fg(app.theme.major));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref snapshot) = app.snapshot {
        let controls = match app.current_view {
            View::Overview => "t:timeframe [ ] { }:range Tab:switch ?:help q:quit",
            View::Events => {
                if app.search_active {
                    "Type to search | Enter:apply Esc:cancel"
                } else {
                    "/:search s:sort t:timeframe Enter:detail ?:help q:quit"
                }
            }
        };

        format!(
            " {} | M{:.1}-{:.1} | updated {} ago | {}",
            app.source_description(),
            app.filter.min_magnitude,
            app.filter.max_magnitude,
            format_age(snapshot.fetched_at.elapsed()),
            controls,
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       View event detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Filtering",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  t/T       Cycle timeframe (hour/day/week/month)"),
        Line::from("  [ / ]     Lower/raise minimum magnitude"),
        Line::from("  { / }     Lower/raise maximum magnitude"),
        Line::from("  /         Search by place"),
        Line::from("  c         Clear search"),
        Line::from("  s/S       Sort column / direction"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 48u16.min(area.width.saturating_sub(4));
    let help_height = 27u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
