use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Allow scrolling through events while overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    // If search input is active, handle text input
    if app.search_active {
        handle_search_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Events),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Timeframe cycling (triggers an immediate re-fetch)
        KeyCode::Char('t') => app.next_timeframe(),
        KeyCode::Char('T') => app.prev_timeframe(),

        // Magnitude range controls, 0.1 steps
        KeyCode::Char('[') => app.lower_min_magnitude(),
        KeyCode::Char(']') => app.raise_min_magnitude(),
        KeyCode::Char('{') => app.lower_max_magnitude(),
        KeyCode::Char('}') => app.raise_max_magnitude(),

        // Manual refresh
        KeyCode::Char('r') => app.refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Sorting (Events view)
        KeyCode::Char('s') => {
            if app.current_view == View::Events {
                app.cycle_sort();
            }
        }
        KeyCode::Char('S') => {
            if app.current_view == View::Events {
                app.toggle_sort_direction();
            }
        }

        // Search (start typing to filter by place)
        KeyCode::Char('/') => app.start_search(),

        // Clear search
        KeyCode::Char('c') => {
            if !app.search_text.is_empty() {
                app.clear_search();
            }
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("quakewatch_export.json");
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while search is active
fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm search
        KeyCode::Enter => {
            app.search_active = false;
        }

        // Cancel search (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_search();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_search();
        }

        // Backspace
        KeyCode::Backspace => {
            app.search_pop();
            if app.search_text.is_empty() {
                app.search_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.search_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => {
            app.select_prev();
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
        }

        // Click to select
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Content rows start after header, tabs, and table header
            if clicked_row > content_start_row && app.current_view == View::Events {
                let item_row = (clicked_row - content_start_row - 1) as usize;
                if item_row < app.visible_events().len() {
                    app.selected_index = item_row;
                }
            }

            // Tab clicks (row 1, after header)
            if clicked_row == 1 {
                let col = mouse.column;
                // Approximate tab positions: Overview (0-12), Events (13-24)
                if col < 13 {
                    app.set_view(View::Overview);
                } else if col < 25 {
                    app.set_view(View::Events);
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => {
            app.go_back();
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FilterState, Timeframe};
    use crate::source::ChannelSource;
    use crossterm::event::KeyEventState;

    fn test_app() -> App {
        let (_tx, source) = ChannelSource::create("test");
        App::new(Box::new(source), FilterState::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_quit_key() {
        let mut app = test_app();
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_timeframe_cycle_key() {
        let mut app = test_app();
        assert_eq!(app.filter.timeframe, Timeframe::Day);
        handle_key_event(&mut app, press(KeyCode::Char('t')));
        assert_eq!(app.filter.timeframe, Timeframe::Week);
        handle_key_event(&mut app, press(KeyCode::Char('T')));
        assert_eq!(app.filter.timeframe, Timeframe::Day);
    }

    #[test]
    fn test_magnitude_step_keys() {
        let mut app = test_app();
        handle_key_event(&mut app, press(KeyCode::Char(']')));
        assert!((app.filter.min_magnitude - 0.1).abs() < 1e-9);
        handle_key_event(&mut app, press(KeyCode::Char('[')));
        assert_eq!(app.filter.min_magnitude, 0.0);
        handle_key_event(&mut app, press(KeyCode::Char('{')));
        assert!((app.filter.max_magnitude - 9.9).abs() < 1e-9);
        handle_key_event(&mut app, press(KeyCode::Char('}')));
        assert_eq!(app.filter.max_magnitude, 10.0);
    }

    #[test]
    fn test_search_input_capture() {
        let mut app = test_app();
        handle_key_event(&mut app, press(KeyCode::Char('/')));
        assert!(app.search_active);
        handle_key_event(&mut app, press(KeyCode::Char('a')));
        handle_key_event(&mut app, press(KeyCode::Char('k')));
        assert_eq!(app.search_text, "ak");
        handle_key_event(&mut app, press(KeyCode::Enter));
        assert!(!app.search_active);
        assert_eq!(app.search_text, "ak");
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = test_app();
        handle_key_event(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, press(KeyCode::Char('x')));
        assert!(!app.show_help);
    }
}
