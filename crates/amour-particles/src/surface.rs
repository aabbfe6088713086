//! In-memory RGBA raster the particles are painted onto.

use amour_core::{Rgba, Viewport};

/// Highest supported device pixels per logical pixel.
pub const MAX_PIXEL_DENSITY: f32 = 2.0;

/// A drawable raster sized to the viewport times the pixel density.
///
/// Drawing calls take logical coordinates; the surface applies the density
/// scale itself.
#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    density: f32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Allocate a transparent surface for `viewport`.
    pub fn new(viewport: Viewport, density: f32) -> Self {
        let mut surface = Self {
            width: 0,
            height: 0,
            density: density.clamp(f32::EPSILON, MAX_PIXEL_DENSITY),
            pixels: Vec::new(),
        };
        surface.resize(viewport);
        surface
    }

    /// Reallocate the raster for a new viewport, dropping its contents.
    pub fn resize(&mut self, viewport: Viewport) {
        self.width = (viewport.width.max(0.0) * self.density).floor() as usize;
        self.height = (viewport.height.max(0.0) * self.density).floor() as usize;
        self.pixels = vec![Rgba::TRANSPARENT; self.width * self.height];
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    /// Pixel at device coordinates.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Whether any pixel has been painted since the last clear.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| p.a <= 0.0)
    }

    /// Fill the shape described by a signed distance function.
    ///
    /// `bounds` is the logical `(min_x, min_y, max_x, max_y)` box containing
    /// the shape; `sdf` returns the signed logical distance to the shape edge
    /// (negative inside); `paint` gives the color at a logical point. Edge
    /// pixels are anti-aliased over one device pixel.
    pub fn fill_sdf(
        &mut self,
        bounds: (f32, f32, f32, f32),
        sdf: impl Fn(f32, f32) -> f32,
        paint: impl Fn(f32, f32) -> Rgba,
    ) {
        let (min_x, min_y, max_x, max_y) = bounds;
        let Some((x0, x1)) = self.device_span(min_x, max_x, self.width) else {
            return;
        };
        let Some((y0, y1)) = self.device_span(min_y, max_y, self.height) else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let lx = (px as f32 + 0.5) / self.density;
                let ly = (py as f32 + 0.5) / self.density;
                let coverage = (0.5 - sdf(lx, ly) * self.density).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let color = paint(lx, ly);
                let color = color.with_alpha(color.a * coverage);
                let idx = py * self.width + px;
                self.pixels[idx] = color.over(self.pixels[idx]);
            }
        }
    }

    /// Combined color of every device pixel whose centre falls inside the
    /// logical rectangle. Alpha is the strongest alpha found, so faint specks
    /// survive downsampling. Falls back to the nearest pixel when the
    /// rectangle is smaller than one device pixel.
    pub fn sample(&self, x: f32, y: f32, width: f32, height: f32) -> Rgba {
        let (Some((x0, x1)), Some((y0, y1))) = (
            self.device_span(x, x + width, self.width),
            self.device_span(y, y + height, self.height),
        ) else {
            return Rgba::TRANSPARENT;
        };

        let mut covered = Vec::new();
        for py in y0..y1 {
            for px in x0..x1 {
                let cx = (px as f32 + 0.5) / self.density;
                let cy = (py as f32 + 0.5) / self.density;
                if cx >= x && cx < x + width && cy >= y && cy < y + height {
                    covered.push(self.pixels[py * self.width + px]);
                }
            }
        }

        if covered.is_empty() {
            let px = ((x + width / 2.0) * self.density) as usize;
            let py = ((y + height / 2.0) * self.density) as usize;
            return self.pixel(px, py).unwrap_or(Rgba::TRANSPARENT);
        }

        let peak = covered.iter().map(|c| c.a).fold(0.0_f32, f32::max);
        Rgba::average(&covered).with_alpha(peak)
    }

    /// Device pixel range `[start, end)` touched by the logical span.
    fn device_span(&self, min: f32, max: f32, limit: usize) -> Option<(usize, usize)> {
        if limit == 0 || max < 0.0 {
            return None;
        }
        let start = (min * self.density).floor().max(0.0) as usize;
        let end = ((max * self.density).ceil().max(0.0) as usize + 1).min(limit);
        (start < end).then_some((start, end))
    }
}
