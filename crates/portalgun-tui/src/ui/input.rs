//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes. Anything that needs the network is handed to
//! `App`, which spawns the work and returns immediately.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, Focus, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ShowingStats => {
            // Any key closes the dialog
            app.state = AppState::Normal;
            return Ok(false);
        }
        AppState::ShowingWarning => {
            app.warning_message = None;
            app.state = AppState::Normal;
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::Searching => return handle_search_input(app, key),
        AppState::Quitting => return Ok(true),
        AppState::Normal => {}
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
            app.focus = Focus::List;
        }
        KeyCode::Char('c') => {
            app.clear_search();
        }
        KeyCode::Esc => {
            if !app.search_query.is_empty() {
                app.clear_search();
            }
        }
        KeyCode::Char('r') => {
            app.pick_random_location();
        }
        KeyCode::Char('s') => {
            app.show_stats();
        }
        KeyCode::Tab | KeyCode::BackTab => {
            // Toggle focus between list and detail panels
            app.focus = match app.focus {
                Focus::List => Focus::Detail,
                Focus::Detail => Focus::List,
            };
        }
        _ => match app.focus {
            Focus::List => handle_list_input(app, key),
            Focus::Detail => handle_detail_input(app, key),
        },
    }

    Ok(false)
}

fn handle_search_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.clear_search();
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
            // Keep search query active
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.on_search_changed();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.on_search_changed();
        }
        _ => {}
    }
    Ok(false)
}

fn handle_list_input(app: &mut App, key: KeyEvent) {
    let max_index = app.filtered_locations().len().saturating_sub(1);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.location_selection = (app.location_selection + 1).min(max_index);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.location_selection = app.location_selection.saturating_sub(1);
        }
        KeyCode::Home => {
            app.location_selection = 0;
        }
        KeyCode::End => {
            app.location_selection = max_index;
        }
        KeyCode::PageDown => {
            app.location_selection = (app.location_selection + PAGE_SCROLL_SIZE).min(max_index);
        }
        KeyCode::PageUp => {
            app.location_selection = app.location_selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        KeyCode::Enter => {
            app.select_location_under_cursor();
        }
        _ => {}
    }
}

fn handle_detail_input(app: &mut App, key: KeyEvent) {
    let page = PAGE_SCROLL_SIZE as isize;

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_cards(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_cards(-1),
        KeyCode::PageDown => app.scroll_cards(page),
        KeyCode::PageUp => app.scroll_cards(-page),
        KeyCode::Home => app.detail_scroll = 0,
        KeyCode::End => app.scroll_cards(isize::MAX),
        _ => {}
    }
}
