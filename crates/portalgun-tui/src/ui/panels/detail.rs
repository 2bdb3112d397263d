use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use portalgun_core::utils::{format_date, truncate_string};
use portalgun_core::{Location, MAX_RESIDENTS};

use crate::app::{App, Focus, PortraitSlot, ResidentCard, ResidentsView};
use crate::ui::portrait::PortraitWidget;
use crate::ui::styles;

/// Rows taken by one resident card
pub const CARD_HEIGHT: u16 = 6;
/// Bordered location info block: name, spacer and five fields
const INFO_HEIGHT: u16 = 9;
/// Columns taken by the portrait on a card (roughly square at 6 rows)
const PORTRAIT_WIDTH: u16 = 12;

/// Render the selected location and its resident gallery
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(INFO_HEIGHT), Constraint::Min(CARD_HEIGHT)])
        .split(area);

    render_info(frame, app.selected_location(), chunks[0]);
    render_gallery(frame, app, chunks[1]);
}

fn render_info(frame: &mut Frame, location: Option<&Location>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::muted_style());

    let Some(location) = location else {
        let hint = Line::from(vec![
            Span::styled(" Press ", styles::muted_style()),
            Span::styled("Enter", styles::help_key_style()),
            Span::styled(" on a location or ", styles::muted_style()),
            Span::styled("r", styles::help_key_style()),
            Span::styled(" for a random one", styles::muted_style()),
        ]);
        frame.render_widget(Paragraph::new(hint).block(block), area);
        return;
    };

    let count = location.resident_count();
    let residents = if count > MAX_RESIDENTS {
        format!("{} (showing first {})", count, MAX_RESIDENTS)
    } else {
        count.to_string()
    };

    let lines = vec![
        Line::from(Span::styled(location.name.as_str(), styles::title_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID:         ", styles::muted_style()),
            Span::raw(location.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Type:       ", styles::muted_style()),
            Span::raw(location.kind_display()),
        ]),
        Line::from(vec![
            Span::styled("Dimension:  ", styles::muted_style()),
            Span::raw(location.dimension_display()),
        ]),
        Line::from(vec![
            Span::styled("Residents:  ", styles::muted_style()),
            Span::raw(residents),
        ]),
        Line::from(vec![
            Span::styled("Created:    ", styles::muted_style()),
            Span::raw(format_date(location.created.as_ref())),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_gallery(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::Detail);
    let cards = app.resident_cards();

    let title = if cards.is_empty() {
        " Residents ".to_string()
    } else {
        let last = cards.len().min(app.detail_scroll + visible_cards(area));
        format!(" Residents ({}-{} of {}) ", app.detail_scroll + 1, last, cards.len())
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let placeholder = match app.residents {
        ResidentsView::Empty => Some(Span::styled(" No location selected", styles::muted_style())),
        ResidentsView::NoResidents => Some(Span::styled(" Nobody lives here.", styles::muted_style())),
        ResidentsView::Loading { .. } => Some(Span::styled(" Loading residents...", styles::muted_style())),
        ResidentsView::Failed { .. } => Some(Span::styled(" Could not load residents.", styles::error_style())),
        ResidentsView::Loaded { .. } => None,
    };

    if let Some(span) = placeholder {
        frame.render_widget(Paragraph::new(Line::from(span)).block(block), area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y;
    for card in cards.iter().skip(app.detail_scroll) {
        if y + CARD_HEIGHT > inner.y + inner.height {
            break;
        }
        render_card(frame, card, Rect::new(inner.x, y, inner.width, CARD_HEIGHT));
        y += CARD_HEIGHT;
    }
}

/// Number of whole cards that fit inside a bordered gallery
fn visible_cards(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(2) / CARD_HEIGHT).max(1)
}

fn render_card(frame: &mut Frame, card: &ResidentCard, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PORTRAIT_WIDTH), Constraint::Length(1), Constraint::Min(10)])
        .split(area);

    let portrait_area = Rect {
        height: area.height.saturating_sub(1),
        ..chunks[0]
    };

    match card.portrait {
        PortraitSlot::Ready(ref portrait) => {
            frame.render_widget(PortraitWidget::new(portrait), portrait_area);
        }
        PortraitSlot::Loading => {
            frame.render_widget(
                Paragraph::new(Span::styled("loading", styles::muted_style())),
                portrait_area,
            );
        }
        PortraitSlot::Missing => {
            frame.render_widget(
                Paragraph::new(Span::styled("no image", styles::muted_style())),
                portrait_area,
            );
        }
    }

    let character = &card.character;
    let name_width = usize::from(chunks[2].width);

    let lines = vec![
        Line::from(Span::styled(
            truncate_string(character.display_name(), name_width),
            styles::header_style(),
        )),
        Line::from(vec![
            Span::styled("● ", styles::status_style(character.status_kind())),
            Span::styled(character.status_display(), styles::status_style(character.status_kind())),
            Span::styled(" - ", styles::muted_style()),
            Span::raw(character.species.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Gender: ", styles::muted_style()),
            Span::raw(character.gender_display()),
        ]),
        Line::from(vec![
            Span::styled("Origin: ", styles::muted_style()),
            Span::raw(character.origin_display()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use portalgun_core::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_rows(app: &App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(f, app, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_info_block_shows_location_fields() {
        let mut app = App::new(Config::default()).unwrap();
        app.locations = vec![Location {
            id: 42,
            name: "Froopyland".to_string(),
            kind: "Fantasy town".to_string(),
            dimension: String::new(),
            residents: Vec::new(),
            url: String::new(),
            created: None,
        }];
        app.selected_location_id = Some(42);
        app.residents = ResidentsView::NoResidents;

        let rows = rendered_rows(&app);

        assert!(rows.iter().any(|r| r.contains("Froopyland")));
        assert!(rows.iter().any(|r| r.contains("ID:") && r.contains("42")));
        assert!(rows.iter().any(|r| r.contains("Type:") && r.contains("Fantasy town")));
        assert!(rows.iter().any(|r| r.contains("Dimension:") && r.contains('-')));
        assert!(rows.iter().any(|r| r.contains("Nobody lives here.")));
    }

    #[test]
    fn test_hint_when_nothing_selected() {
        let app = App::new(Config::default()).unwrap();
        let rows = rendered_rows(&app);
        assert!(rows.iter().any(|r| r.contains("for a random one")));
        assert!(rows.iter().any(|r| r.contains("No location selected")));
    }
}
