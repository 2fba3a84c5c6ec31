use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::Intent;
use crate::ui::app::{App, FocusedPanel, InputMode};

/// Routes a key to the topmost layer: help, then trailer, then detail,
/// then the base view.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == InputMode::Help {
        handle_help_keys(app, key);
    } else if app.controller.trailer().is_showing() {
        handle_trailer_keys(app, key);
    } else if app.controller.detail().is_open() {
        handle_detail_keys(app, key);
    } else if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        toggle_focus(app);
    } else {
        match app.focused_panel {
            FocusedPanel::SearchBar => handle_search_bar_keys(app, key),
            FocusedPanel::Results => handle_browse_keys(app, key),
        }
    }
}

fn toggle_focus(app: &mut App) {
    app.focused_panel = match app.focused_panel {
        FocusedPanel::SearchBar => FocusedPanel::Results,
        FocusedPanel::Results => FocusedPanel::SearchBar,
    };
}

fn handle_browse_keys(app: &mut App, key: KeyEvent) {
    let in_search = !app.controller.view().is_home();

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc if in_search => app.push(Intent::ReturnHome),
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('s') | KeyCode::Char('/') => app.focused_panel = FocusedPanel::SearchBar,
        KeyCode::Char('h') | KeyCode::Char('?') => app.input_mode = InputMode::Help,
        KeyCode::Char('x') => {
            app.push(Intent::ClearError);
            app.push(Intent::ClearNotice);
        }
        // Home also re-requests the catalog when it failed to load.
        KeyCode::Char('b') => app.push(Intent::ReturnHome),
        KeyCode::Backspace if !app.number_input.is_empty() => {
            app.number_input.pop();
        }
        KeyCode::Backspace => app.push(Intent::ReturnHome),
        KeyCode::Up => move_up(app, in_search),
        KeyCode::Down => move_down(app, in_search),
        KeyCode::Left if in_search => app.push(Intent::PrevPage),
        KeyCode::Right if in_search => app.push(Intent::NextPage),
        KeyCode::Left => app.selected_index = app.selected_index.saturating_sub(1),
        KeyCode::Right => {
            if app.selected_index + 1 < app.visible_movies().len() {
                app.selected_index += 1;
            }
        }
        KeyCode::Char('n') if in_search => app.push(Intent::NextPage),
        KeyCode::Char('p') if in_search => app.push(Intent::PrevPage),
        KeyCode::Char('r') if !in_search => {
            if let Some(genre) = app.shelf_genre() {
                let genre = genre.to_string();
                app.push(Intent::SelectGenre(genre));
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() && in_search => app.number_input.push(c),
        KeyCode::Enter => {
            if !app.number_input.is_empty() {
                let page = app.number_input.parse::<usize>().ok();
                app.number_input.clear();
                if let Some(page) = page {
                    app.push(Intent::GoToPage(page));
                }
            } else if let Some(movie) = app.selected_movie() {
                let id = movie.id.clone();
                app.push(Intent::OpenMovie(id));
            }
        }
        _ => {}
    }
}

fn move_up(app: &mut App, in_search: bool) {
    if in_search {
        app.selected_index = app.selected_index.saturating_sub(1);
    } else if app.shelf_index > 0 {
        app.shelf_index -= 1;
        app.selected_index = 0;
    }
}

fn move_down(app: &mut App, in_search: bool) {
    if in_search {
        if app.selected_index + 1 < app.visible_movies().len() {
            app.selected_index += 1;
        }
    } else {
        let shelves = app.catalog().map(|c| c.shelves.len()).unwrap_or(0);
        if app.shelf_index + 1 < shelves {
            app.shelf_index += 1;
            app.selected_index = 0;
        }
    }
}

fn handle_search_bar_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.search_input.push(c),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        // Submission is disabled while anything is loading.
        KeyCode::Enter if !app.controller.is_loading() => {
            app.push(Intent::SubmitQuery(app.search_input.clone()));
            app.focused_panel = FocusedPanel::Results;
        }
        KeyCode::Esc => {
            app.search_input.clear();
            app.focused_panel = FocusedPanel::Results;
        }
        _ => {}
    }
}

fn handle_detail_keys(app: &mut App, key: KeyEvent) {
    let detail = app.controller.detail();
    let extended = detail.is_extended();
    let trailer_id = detail
        .detail()
        .filter(|d| d.has_trailer())
        .map(|d| d.summary.id.clone());

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.push(Intent::CloseDetail),
        KeyCode::Char('e') | KeyCode::Char('i') if !extended => app.push(Intent::ExpandDetail),
        KeyCode::Char('b') | KeyCode::Backspace if extended => app.push(Intent::CollapseDetail),
        KeyCode::Char('t') => {
            if let Some(id) = trailer_id {
                app.push(Intent::RequestTrailer(id));
            }
        }
        KeyCode::Char('x') => {
            app.push(Intent::ClearError);
            app.push(Intent::ClearNotice);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.push(Intent::OpenOffer(index));
        }
        _ => {}
    }
}

fn handle_trailer_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.push(Intent::DismissTrailer),
        KeyCode::Enter | KeyCode::Char('o') => app.push(Intent::OpenTrailer),
        _ => {}
    }
}

fn handle_help_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::Char('q') => {
            app.input_mode = InputMode::Browse;
        }
        _ => {}
    }
}
