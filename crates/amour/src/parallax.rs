//! Pointer-driven background offset.

use amour_core::Viewport;

/// Maximum offset in logical pixels at either edge of the screen, doubled.
const PARALLAX_STRENGTH: f32 = 10.0;

/// Tracks the translation applied to the background layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Parallax {
    offset: (f32, f32),
}

impl Parallax {
    /// Recompute the offset for a pointer at logical (`x`, `y`).
    pub fn on_pointer_move(&mut self, x: f32, y: f32, viewport: Viewport) -> (f32, f32) {
        let (nx, ny) = viewport.normalized_offset(x, y);
        self.offset = (nx * PARALLAX_STRENGTH, ny * PARALLAX_STRENGTH);
        self.offset
    }

    /// Last applied offset.
    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centre_has_no_offset() {
        let mut parallax = Parallax::default();
        let offset = parallax.on_pointer_move(400.0, 300.0, Viewport::new(800.0, 600.0));
        assert_eq!(offset, (0.0, 0.0));
    }

    #[test]
    fn test_corners_reach_five_pixels() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut parallax = Parallax::default();
        assert_eq!(parallax.on_pointer_move(0.0, 0.0, viewport), (-5.0, -5.0));
        assert_eq!(parallax.on_pointer_move(800.0, 600.0, viewport), (5.0, 5.0));
        assert_eq!(parallax.offset(), (5.0, 5.0));
    }

    #[test]
    fn test_offset_is_proportional() {
        let mut parallax = Parallax::default();
        let (dx, dy) = parallax.on_pointer_move(600.0, 150.0, Viewport::new(800.0, 600.0));
        assert!((dx - 2.5).abs() < 1e-6);
        assert!((dy + 2.5).abs() < 1e-6);
    }
}
