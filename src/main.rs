// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod data;
mod events;
mod source;
mod ui;

use app::{App, View};
use data::{FilterState, Timeframe, MAG_CEIL, MAG_FLOOR};
use source::{FeedSource, FileSource, HttpSource};

#[derive(Parser, Debug)]
#[command(name = "quakewatch")]
#[command(about = "Terminal dashboard for monitoring USGS earthquake feed activity")]
struct Args {
    /// Feed timeframe to poll
    #[arg(short, long, value_enum, default_value = "day")]
    timeframe: Timeframe,

    /// Minimum magnitude to display (0-10)
    #[arg(long, default_value = "0.0")]
    min_mag: f64,

    /// Maximum magnitude to display (0-10)
    #[arg(long, default_value = "10.0")]
    max_mag: f64,

    /// Read a saved GeoJSON feed document instead of polling the live feed
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Fetch once, write filtered events and statistics to JSON, and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Append tracing output to this file (respects RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !(MAG_FLOOR..=MAG_CEIL).contains(&args.min_mag)
        || !(MAG_FLOOR..=MAG_CEIL).contains(&args.max_mag)
        || args.min_mag > args.max_mag
    {
        anyhow::bail!(
            "magnitude range must satisfy {} <= min <= max <= {}",
            MAG_FLOOR,
            MAG_CEIL
        );
    }

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let filter = FilterState::new(args.timeframe, args.min_mag, args.max_mag);

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(&args, filter, export_path);
    }

    // Handle file-based mode
    if let Some(ref path) = args.file {
        let source = Box::new(FileSource::new(path, args.timeframe));
        return run_tui(source, filter);
    }

    // Default: poll the live feed. The runtime must outlive the TUI loop so
    // the background fetch task keeps running.
    let rt = tokio::runtime::Runtime::new()?;
    let source = rt.block_on(async { HttpSource::spawn(args.timeframe) })?;
    run_tui(Box::new(source), filter)
}

/// Set up tracing to a log file, filtered by RUST_LOG.
fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the TUI with the given feed source
fn run_tui(source: Box<dyn FeedSource>, filter: FilterState) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(source, filter);
    app.poll_feed();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                frame.render_widget(paragraph, resize_notice_area(area));
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with feed status
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[2]),
                View::Events => ui::events::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render detail overlay if active
            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for input events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Apply any completed fetches; the source paces itself
        app.poll_feed();
    }

    Ok(())
}

/// Rect for the "terminal too small" notice, centered but clamped so it
/// stays inside the buffer even on terminals shorter than the notice.
fn resize_notice_area(area: ratatui::layout::Rect) -> ratatui::layout::Rect {
    ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
        .intersection(area)
}

/// Fetch once (from the feed or a file) and export filtered events to JSON.
fn export_to_file(args: &Args, filter: FilterState, export_path: &std::path::Path) -> Result<()> {
    let source: Box<dyn FeedSource> = if let Some(ref path) = args.file {
        Box::new(FileSource::new(path, args.timeframe))
    } else {
        let rt = tokio::runtime::Runtime::new()?;
        let timeframe = args.timeframe;
        let document = rt.block_on(async {
            let client = reqwest::Client::new();
            source::fetch_document(&client, timeframe).await
        })?;
        let payload = source::FeedPayload::from(document);
        let (tx, channel) = source::ChannelSource::create("export");
        tx.send(Some(source::FetchOutcome {
            timeframe,
            result: Ok(payload),
        }))
        .map_err(|_| anyhow::anyhow!("export channel closed"))?;
        Box::new(channel)
    };

    let mut app = App::new(source, filter);
    if !app.poll_feed() {
        if let Some(err) = app.load_error.clone() {
            anyhow::bail!("failed to load feed: {}", err);
        }
        anyhow::bail!("no feed data available");
    }

    app.export_state(export_path)?;
    println!("Exported {} events to: {}", app.stats.total, export_path.display());
    Ok(())
}
