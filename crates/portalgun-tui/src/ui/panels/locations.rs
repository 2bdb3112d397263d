use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::styles;

/// Render the location table
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::List);
    let filtered = app.filtered_locations();

    let title = if app.search_query.is_empty() {
        format!(" Locations ({}) ", app.locations.len())
    } else {
        format!(" Locations ({} of {}) ", filtered.len(), app.locations.len())
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    if !app.locations_loaded {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            " Loading locations...",
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if filtered.is_empty() {
        let message = if app.locations.is_empty() {
            " No locations could be loaded"
        } else {
            " No locations match the search"
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(message, styles::muted_style())))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Type"),
        Cell::from("Dimension"),
        Cell::from("Res"),
    ])
    .style(styles::header_style())
    .height(1);

    let rows: Vec<Row> = filtered
        .iter()
        .enumerate()
        .map(|(i, location)| {
            let style = if i == app.location_selection {
                styles::selected_style()
            } else if Some(location.id) == app.selected_location_id {
                styles::highlight_style()
            } else {
                styles::list_item_style()
            };

            Row::new(vec![
                Cell::from(location.name.as_str()),
                Cell::from(location.kind_display()),
                Cell::from(location.dimension_display()),
                Cell::from(format!("{:>3}", location.resident_count())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(38), // Name
        Constraint::Fill(2),        // Type
        Constraint::Fill(3),        // Dimension
        Constraint::Length(4),      // Residents
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.location_selection));

    frame.render_stateful_widget(table, area, &mut state);
}
