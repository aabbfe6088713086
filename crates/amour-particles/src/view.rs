//! Terminal presentation of a [`Surface`] using half-block characters.

use amour_core::{CellSize, Rgba};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::surface::Surface;

/// Upper half block: foreground paints the top half, background the bottom.
const HALF_BLOCK: &str = "▀";

/// Widget drawing a surface over a backdrop, two vertical samples per cell.
///
/// `backdrop` returns the opaque color behind the particles at a logical
/// point, which lets the caller shift the background layer independently.
pub struct HalfBlockView<'a, F> {
    surface: &'a Surface,
    cell: CellSize,
    backdrop: F,
}

impl<'a, F> HalfBlockView<'a, F>
where
    F: Fn(f32, f32) -> Rgba,
{
    pub fn new(surface: &'a Surface, cell: CellSize, backdrop: F) -> Self {
        Self {
            surface,
            cell,
            backdrop,
        }
    }

    /// Composited color for the half cell whose top-left is (`x`, `y`).
    fn half_cell(&self, x: f32, y: f32) -> Rgba {
        let width = self.cell.width;
        let height = self.cell.height / 2.0;
        let behind = (self.backdrop)(x + width / 2.0, y + height / 2.0);
        self.surface.sample(x, y, width, height).over(behind)
    }
}

impl<F> Widget for HalfBlockView<'_, F>
where
    F: Fn(f32, f32) -> Rgba,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in area.top()..area.bottom() {
            for col in area.left()..area.right() {
                let x = (col - area.x) as f32 * self.cell.width;
                let y = (row - area.y) as f32 * self.cell.height;
                let top = self.half_cell(x, y);
                let bottom = self.half_cell(x, y + self.cell.height / 2.0);
                if let Some(cell) = buf.cell_mut((col, row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(top.to_color())
                        .set_bg(bottom.to_color());
                }
            }
        }
    }
}
