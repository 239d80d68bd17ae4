//! Presents a `Surface` in the terminal with upper-half-block glyphs.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use super::surface::{Rgba, Surface};

const UPPER_HALF: &str = "\u{2580}";

pub struct SurfaceView<'a> {
    surface: &'a Surface,
    background: Rgba,
}

impl<'a> SurfaceView<'a> {
    pub fn new(surface: &'a Surface, background: [u8; 3]) -> Self {
        Self {
            surface,
            background: Rgba::new(background[0], background[1], background[2], 255),
        }
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        let px = self
            .surface
            .pixel(x, y)
            .unwrap_or(Rgba::TRANSPARENT)
            .over(self.background);
        Color::Rgb(px.r, px.g, px.b)
    }
}

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let density = self.surface.density();
        let dx = usize::from(density.x.max(1));
        let dy = usize::from(density.y.max(1));

        for row in 0..area.height {
            for col in 0..area.width {
                let px = usize::from(col) * dx;
                let py = usize::from(row) * dy;
                let top = self.color_at(px, py);
                let bottom = if dy > 1 { self.color_at(px, py + 1) } else { top };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF).set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}
