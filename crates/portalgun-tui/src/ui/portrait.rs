//! Draws a cached portrait into terminal cells.
//!
//! Each cell shows two vertically stacked pixels using the upper half block:
//! the foreground is the top half, the background the bottom half.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use portalgun_core::Portrait;

const UPPER_HALF_BLOCK: &str = "▀";

pub struct PortraitWidget<'a> {
    portrait: &'a Portrait,
}

impl<'a> PortraitWidget<'a> {
    pub fn new(portrait: &'a Portrait) -> Self {
        Self { portrait }
    }

    /// Pixel span [start, end) covered by `index` out of `parts` equal slices
    fn span(total: u32, index: u32, parts: u32) -> (u32, u32) {
        let start = index * total / parts;
        let end = ((index + 1) * total / parts).max(start + 1);
        (start, end)
    }

    fn color_at(&self, col: u32, sub_row: u32, cols: u32, sub_rows: u32) -> Color {
        let (x0, x1) = Self::span(self.portrait.width(), col, cols);
        let (y0, y1) = Self::span(self.portrait.height(), sub_row, sub_rows);
        let [r, g, b] = self.portrait.average_rgb(x0, y0, x1 - x0, y1 - y0);
        Color::Rgb(r, g, b)
    }
}

impl Widget for PortraitWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let cols = u32::from(area.width);
        let sub_rows = u32::from(area.height) * 2;

        for row in 0..area.height {
            for col in 0..area.width {
                let top = self.color_at(u32::from(col), u32::from(row) * 2, cols, sub_rows);
                let bottom = self.color_at(u32::from(col), u32::from(row) * 2 + 1, cols, sub_rows);

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF_BLOCK).set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}
