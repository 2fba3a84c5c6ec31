use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::detail::DetailDisclosure;
use crate::models::{MovieDetail, MovieSummary, OfferKind, Rating, TrendingCatalog, genre_display_name};
use crate::pagination::{self, PAGE_SIZE};
use crate::session::{SearchSession, SessionStatus};
use crate::ui::app::{App, FocusedPanel, InputMode};
use crate::view::{TrendingState, ViewState};

const TITLE_WIDTH: usize = 40;
const SHELF_TITLE_WIDTH: usize = 22;
const PLOT_PREVIEW: usize = 100;
const CAST_PREVIEW: usize = 100;

pub fn render_ui(f: &mut Frame, app: &App) {
    let banner_height = if app.controller.error().is_some() || app.controller.notice().is_some() {
        1
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Header
            Constraint::Length(3),             // Search bar
            Constraint::Length(banner_height), // Error / notice
            Constraint::Min(0),                // Body
            Constraint::Length(1),             // Pagination
            Constraint::Length(1),             // Footer
        ])
        .split(f.size());

    render_header(f, app, chunks[0]);
    render_search_bar(f, app, chunks[1]);
    render_banner(f, app, chunks[2]);
    match app.controller.view() {
        ViewState::Home { trending } => render_home(f, app, trending, chunks[3]),
        ViewState::Search { session, page } => {
            render_search(f, app, session, *page, chunks[3]);
            render_pagination(f, app, *page, chunks[4]);
        }
    }
    render_footer(f, app, chunks[5]);

    match app.controller.detail() {
        DetailDisclosure::Closed => {}
        DetailDisclosure::Basic(detail) => render_detail(f, detail, false),
        DetailDisclosure::Extended(detail) => render_detail(f, detail, true),
    }
    if let Some(url) = app.controller.trailer().url() {
        render_trailer(f, url);
    }
    if app.input_mode == InputMode::Help {
        render_help(f);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let location = match app.controller.view().session() {
        Some(session) => session.description(),
        None => "Trending".to_string(),
    };
    let header = Paragraph::new(format!("cinematch │ {}", location))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_panel == FocusedPanel::SearchBar;
    let border = if focused { Color::Yellow } else { Color::DarkGray };

    let text = if focused {
        format!("{}█", app.search_input)
    } else if app.search_input.is_empty() {
        "Search by title, plot, actor or studio (press / to type)".to_string()
    } else {
        app.search_input.clone()
    };
    let style = if focused || !app.search_input.is_empty() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Search")
        .border_style(Style::default().fg(border));
    f.render_widget(Paragraph::new(text).style(style).block(block), area);
}

fn render_banner(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = app.controller.error() {
        Line::from(Span::styled(
            format!("✗ {}  (x to dismiss)", error),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(notice) = app.controller.notice() {
        Line::from(Span::styled(
            format!("ℹ {}  (x to dismiss)", notice),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        return;
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_home(f: &mut Frame, app: &App, trending: &TrendingState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Trending")
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = match trending {
        TrendingState::Pending => vec![Line::from("Loading trending movies...")],
        TrendingState::Failed(message) => vec![
            Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
            Line::from("Press b to try again."),
        ],
        TrendingState::Loaded(catalog) if catalog.is_empty() => {
            vec![Line::from("Nothing is trending right now.")]
        }
        TrendingState::Loaded(catalog) => shelf_lines(app, catalog),
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn shelf_lines<'a>(app: &App, catalog: &'a TrendingCatalog) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for (i, shelf) in catalog.shelves.iter().enumerate() {
        let current = i == app.shelf_index;
        let heading_style = if current {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        lines.push(Line::from(Span::styled(
            format!("{} ({})", genre_display_name(&shelf.genre), shelf.movies.len()),
            heading_style,
        )));

        let mut spans = vec![Span::raw("  ")];
        for (j, movie) in shelf.movies.iter().enumerate() {
            if j > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            let style = if current && j == app.selected_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(truncate_text(&movie.title, SHELF_TITLE_WIDTH), style));
            spans.push(Span::styled(format!(" {}", movie.year), Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!(" ★{}", movie.rating),
                Style::default().fg(rating_color(movie.rating)),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines
}

fn render_search(f: &mut Frame, app: &App, session: &SearchSession, page: usize, area: Rect) {
    let description = session.description();

    let (title, lines) = match &session.status {
        SessionStatus::Loading => (
            "Searching".to_string(),
            vec![Line::from(format!("Searching for \"{}\"...", description))],
        ),
        SessionStatus::Error(message) => (
            "Search".to_string(),
            vec![
                Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
                Line::from("Press / to search again or b to go home."),
            ],
        ),
        SessionStatus::Success(set) => {
            let suffix = set.search_type.map(|t| t.header_suffix()).unwrap_or("");
            let mut title = format!("{} results for \"{}\"{}", set.results.len(), set.query, suffix);
            if let Some(seconds) = set.search_time {
                title.push_str(&format!(" • Found in {:.2}s", seconds));
            }

            let lines = if set.results.is_empty() {
                vec![Line::from(format!("No movies found for \"{}\".", description))]
            } else {
                let offset = (page - 1) * PAGE_SIZE;
                pagination::page_items(&set.results, page)
                    .iter()
                    .enumerate()
                    .flat_map(|(i, movie)| result_lines(movie, offset + i + 1, i == app.selected_index))
                    .collect()
            };
            (title, lines)
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Title row plus a plot excerpt.
fn result_lines(movie: &MovieSummary, number: usize, selected: bool) -> Vec<Line<'static>> {
    let mut spans = vec![
        Span::raw(format!("{:>3}. ", number)),
        Span::styled(
            format!("{:<width$}", truncate_text(&movie.title, TITLE_WIDTH), width = TITLE_WIDTH),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {:>4} ", movie.year), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("★ {:<4}", movie.rating), Style::default().fg(rating_color(movie.rating))),
        Span::styled(format!(" {}", movie.primary_genre()), Style::default().fg(Color::Cyan)),
    ];
    if let Some(percent) = movie.match_percent() {
        spans.push(Span::styled(
            format!("  {}% match", percent),
            Style::default().fg(Color::Green),
        ));
    }

    let mut line = Line::from(spans);
    if selected {
        line.style = Style::default().add_modifier(Modifier::REVERSED);
    }

    let plot = Line::from(Span::styled(
        format!("     {}", truncate_text(&movie.plot, PLOT_PREVIEW)),
        Style::default().fg(Color::Gray),
    ));
    vec![line, plot]
}

fn render_pagination(f: &mut Frame, app: &App, page: usize, area: Rect) {
    let total = app.controller.view().total_pages();
    if total <= 1 {
        return;
    }
    let mut text = pagination_line(page, total);
    if !app.number_input.is_empty() {
        text.push_str(&format!("  Go to: {}", app.number_input));
    }
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = if app.input_mode == InputMode::Help {
        "Esc: Close help"
    } else if app.controller.trailer().is_showing() {
        "o/Enter: Open in browser │ Esc: Close trailer"
    } else if app.controller.detail().is_extended() {
        "b: Less │ t: Trailer │ 1-9: Open provider │ Esc: Close"
    } else if app.controller.detail().is_open() {
        "e: More info │ t: Trailer │ 1-9: Open provider │ Esc: Close"
    } else if app.focused_panel == FocusedPanel::SearchBar {
        "Enter: Search │ Esc: Cancel │ Tab: Results"
    } else if app.controller.view().is_home() {
        "↑↓: Genre │ ←→: Movie │ Enter: Details │ r: More like this │ /: Search │ h: Help │ q: Quit"
    } else {
        "↑↓: Select │ ←→/n/p: Page │ 0-9 Enter: Jump │ Enter: Details │ b: Home │ h: Help │ q: Quit"
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];
    if app.controller.is_loading() {
        spans.push(Span::styled(
            "  Searching...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_detail(f: &mut Frame, detail: &MovieDetail, extended: bool) {
    let area = centered_rect(70, 75, f.size());
    let movie = &detail.summary;
    let label = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", movie.year), label),
            Span::styled(format!("★ {}", movie.rating), Style::default().fg(rating_color(movie.rating))),
            Span::styled(format!("  {}", movie.genre), Style::default().fg(Color::Cyan)),
            Span::styled(poster_marker(movie), label),
        ]),
    ];
    if !detail.runtime.is_empty() {
        lines.push(Line::from(vec![Span::styled("Runtime: ", label), Span::raw(detail.runtime.clone())]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(if movie.plot.is_empty() {
        "No plot available.".to_string()
    } else {
        movie.plot.clone()
    }));

    lines.push(Line::from(""));
    lines.extend(credit_lines(detail, extended));
    lines.push(Line::from(""));
    lines.extend(offer_lines(detail));

    if detail.has_trailer() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("▶ Trailer available (t)", Style::default().fg(Color::Green))));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(movie.title.clone())
        .border_style(Style::default().fg(Color::Yellow));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Basic shows a cast preview; extended adds the release date and full cast.
fn credit_lines(detail: &MovieDetail, extended: bool) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();
    if extended && !detail.release_date.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Released: ", label),
            Span::raw(detail.release_date.clone()),
        ]));
    }

    let cast = detail.cast().map(|cast| {
        if extended {
            cast.to_string()
        } else {
            truncate_text(cast, CAST_PREVIEW)
        }
    });
    for (name, value) in [
        ("Cast: ", cast),
        ("Director: ", detail.director().map(str::to_string)),
        ("Studios: ", detail.production_companies().map(str::to_string)),
    ] {
        if let Some(value) = value {
            lines.push(Line::from(vec![Span::styled(name, label), Span::raw(value)]));
        }
    }
    lines
}

/// Numbered to match the 1-9 keys.
fn offer_lines(detail: &MovieDetail) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    if detail.streaming.is_empty() {
        return vec![Line::from(Span::styled("No streaming providers listed.", label))];
    }

    let mut lines = vec![Line::from(Span::styled("Where to watch:", label))];
    for (i, offer) in detail.streaming.iter().enumerate().take(9) {
        lines.push(Line::from(vec![
            Span::raw(format!("  {}. {} ", i + 1, offer.name)),
            Span::styled(format!("[{}]", offer.kind.label()), Style::default().fg(offer_color(offer.kind))),
        ]));
    }
    lines
}

fn poster_marker(movie: &MovieSummary) -> &'static str {
    if movie.poster.as_deref().is_some_and(|p| !p.trim().is_empty()) {
        "  ▣ Poster"
    } else {
        "  □ No poster"
    }
}

fn render_trailer(f: &mut Frame, url: &str) {
    let area = centered_rect(60, 30, f.size());
    let lines = vec![
        Line::from("Trailer ready:"),
        Line::from(Span::styled(url.to_string(), Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled(
            "Press o or Enter to watch it in your browser.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Trailer")
        .border_style(Style::default().fg(Color::Magenta));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.size());
    let rows = [
        ("/ or s", "Focus the search bar"),
        ("Enter", "Search, open details or jump to typed page"),
        ("↑ ↓", "Move between genres or results"),
        ("← →", "Move within a genre or change page"),
        ("n / p", "Next or previous page"),
        ("r", "Recommendations for the highlighted genre"),
        ("b", "Back to trending"),
        ("e / b", "More or less detail"),
        ("t", "Trailer"),
        ("1-9", "Open a streaming provider"),
        ("x", "Dismiss messages"),
        ("q", "Quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:>8}  ", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title("Help");
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

pub fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Score(score) if score >= 8.0 => Color::Green,
        Rating::Score(score) if score >= 7.0 => Color::LightGreen,
        Rating::Score(score) if score >= 6.0 => Color::Yellow,
        Rating::Score(_) => Color::Red,
        Rating::NotAvailable => Color::DarkGray,
    }
}

pub fn offer_color(kind: OfferKind) -> Color {
    match kind {
        OfferKind::Stream => Color::Green,
        OfferKind::Rent => Color::Yellow,
        OfferKind::Buy => Color::Blue,
        OfferKind::Other => Color::Gray,
    }
}

/// `‹ 1 [2] 3 4 5 ›  Page 2/9`, with arrows only where there is somewhere to go.
pub fn pagination_line(current: usize, total: usize) -> String {
    let mut parts = Vec::new();
    if current > 1 {
        parts.push("‹".to_string());
    }
    for n in pagination::visible_page_numbers(current, total) {
        if n == current {
            parts.push(format!("[{}]", n));
        } else {
            parts.push(n.to_string());
        }
    }
    if current < total {
        parts.push("›".to_string());
    }
    format!("{}  Page {}/{}", parts.join(" "), current, total)
}
