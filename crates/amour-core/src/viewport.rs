//! Viewport geometry.

/// Size of one terminal cell in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

impl CellSize {
    /// Create a cell size, in logical pixels.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Logical-pixel centre of the cell at (`col`, `row`).
    pub fn cell_center(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.width,
            (row as f32 + 0.5) * self.height,
        )
    }

    /// Number of whole rows covered by `px` logical pixels, rounded.
    pub fn rows_for(&self, px: f32) -> i32 {
        (px / self.height).round() as i32
    }
}

/// Visible area in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport from logical pixel dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport covering `cols` x `rows` terminal cells.
    pub fn from_cells(cols: u16, rows: u16, cell: CellSize) -> Self {
        Self {
            width: cols as f32 * cell.width,
            height: rows as f32 * cell.height,
        }
    }

    /// Position normalized to `-0.5..=0.5` on both axes, centre at zero.
    pub fn normalized_offset(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x / self.width.max(1.0) - 0.5,
            y / self.height.max(1.0) - 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cells() {
        let viewport = Viewport::from_cells(100, 40, CellSize::default());
        assert_eq!(viewport.width, 800.0);
        assert_eq!(viewport.height, 640.0);
    }

    #[test]
    fn test_normalized_offset_centre_is_zero() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.normalized_offset(400.0, 300.0), (0.0, 0.0));
        assert_eq!(viewport.normalized_offset(0.0, 600.0), (-0.5, 0.5));
    }

    #[test]
    fn test_cell_center() {
        let cell = CellSize::default();
        assert_eq!(cell.cell_center(0, 0), (4.0, 8.0));
        assert_eq!(cell.cell_center(2, 1), (20.0, 24.0));
        assert_eq!(cell.rows_for(24.0), 2);
    }
}
