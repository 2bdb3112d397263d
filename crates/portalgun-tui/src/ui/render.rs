use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState};

use super::panels::{detail, locations};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Search bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_search_bar(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame, app),
        AppState::ShowingStats => render_stats_overlay(frame, app),
        AppState::ShowingWarning => render_warning_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Searching | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  Portalgun - Rick and Morty locations";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let searching = matches!(app.state, AppState::Searching);

    let line = if searching {
        Line::from(vec![
            Span::styled(" Search: ", styles::search_style()),
            Span::raw(app.search_query.as_str()),
            Span::styled("▌", styles::search_style()),
        ])
    } else if app.search_query.is_empty() {
        Line::from(vec![
            Span::styled(" Press ", styles::muted_style()),
            Span::styled("/", styles::help_key_style()),
            Span::styled(" to filter by name, type or dimension", styles::muted_style()),
        ])
    } else {
        Line::from(vec![
            Span::styled(" Filter: ", styles::muted_style()),
            Span::styled(app.search_query.as_str(), styles::search_style()),
            Span::styled("  [c] clear", styles::muted_style()),
        ])
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::border_style(searching));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    locations::render(frame, app, chunks[0]);
    detail::render(frame, app, chunks[1]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[r]andom | [s]tats | [q]uit";

    let mut left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => String::from(" "),
    };
    if app.is_busy() {
        left_text.push_str(&format!("[{} loading] ", app.pending_tasks()));
    }

    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn close_hint(keys: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("       Press ", styles::muted_style()),
        Span::styled(keys, styles::help_key_style()),
        Span::styled(" to close", styles::muted_style()),
    ])
}

fn overlay_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(styles::header_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default())
}

fn render_help_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(56, 24, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled(
            format!("  Portalgun version {}", version),
            styles::title_style(),
        )),
        Line::from(Span::styled(
            format!("  {}", app.config.api_base_url),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("↑/↓", "Move cursor / scroll residents"),
        help_line("PgUp/PgDn", "Move a page"),
        help_line("Home/End", "First / last"),
        help_line("Tab", "Switch focus (list ↔ residents)"),
        help_line("Enter", "Show residents of location"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        help_line("/", "Search name, type or dimension"),
        help_line("c / Esc", "Clear search"),
        help_line("r", "Random location"),
        help_line("s", "Statistics"),
        help_line("q", "Quit"),
        Line::from(""),
        close_hint("? or Esc"),
    ];

    let paragraph = Paragraph::new(help_text).block(overlay_block(" Help "));

    frame.render_widget(paragraph, area);
}

fn render_stats_overlay(frame: &mut Frame, app: &App) {
    let height = app.stats_lines.len() as u16 + 4;
    let area = centered_rect_fixed(64, height, frame.area());

    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = app
        .stats_lines
        .iter()
        .map(|line| Line::from(Span::styled(format!(" {}", line), styles::list_item_style())))
        .collect();
    lines.push(Line::from(""));
    lines.push(close_hint("Esc"));

    let paragraph = Paragraph::new(lines).block(overlay_block(" Statistics "));
    frame.render_widget(paragraph, area);
}

fn render_warning_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(64, 6, frame.area());

    frame.render_widget(Clear, area);

    let message = app.warning_message.as_deref().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(format!(" {}", message), styles::highlight_style())),
        Line::from(""),
        close_hint("any key"),
    ];

    let paragraph = Paragraph::new(lines).block(overlay_block(" Warning "));
    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 6, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(overlay_block(" Quit "));

    frame.render_widget(paragraph, area);
}
