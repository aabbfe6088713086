//! Color utilities with straight-alpha compositing.

use ratatui::style::Color;

/// RGBA color with channels in `0.0..=255.0` and alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32, g as f32, b as f32, 1.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Composite `self` over `dst` (source-over).
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.a.clamp(0.0, 1.0);
        let da = dst.a.clamp(0.0, 1.0);
        let out_a = sa + da * (1.0 - sa);
        if out_a <= f32::EPSILON {
            return Rgba::TRANSPARENT;
        }
        let mix = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
        Rgba::new(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            out_a,
        )
    }

    /// Linear interpolation of every channel, alpha included.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Average of the given colors, weighting each channel by alpha.
    pub fn average(colors: &[Rgba]) -> Rgba {
        if colors.is_empty() {
            return Rgba::TRANSPARENT;
        }
        let total_a: f32 = colors.iter().map(|c| c.a).sum();
        let a = total_a / colors.len() as f32;
        if total_a <= f32::EPSILON {
            return Rgba::TRANSPARENT;
        }
        let weighted =
            |f: fn(&Rgba) -> f32| colors.iter().map(|c| f(c) * c.a).sum::<f32>() / total_a;
        Rgba::new(weighted(|c| c.r), weighted(|c| c.g), weighted(|c| c.b), a)
    }

    /// Convert to a terminal color, dropping alpha.
    pub fn to_color(self) -> Color {
        Color::Rgb(
            self.r.clamp(0.0, 255.0).round() as u8,
            self.g.clamp(0.0, 255.0).round() as u8,
            self.b.clamp(0.0, 255.0).round() as u8,
        )
    }
}

/// Convert HSL to an opaque RGBA color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgba {
    if s == 0.0 {
        let v = l * 255.0;
        return Rgba::new(v, v, v, 1.0);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgba::new(r * 255.0, g * 255.0, b * 255.0, 1.0)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
