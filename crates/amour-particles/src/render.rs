//! Particle rasterization.

use std::f32::consts::FRAC_PI_4;

use amour_core::Rgba;

use crate::particle::{Particle, Variant};
use crate::surface::Surface;

/// Dust color before alpha is applied.
const DUST_COLOR: Rgba = Rgba::rgb(255, 255, 255);

/// Dust is drawn at this fraction of the particle alpha.
const DUST_ALPHA_SCALE: f32 = 0.35;

/// Heart gradient color at the centre.
const HEART_CENTER: Rgba = Rgba::rgb(255, 209, 223);

/// Heart gradient color at the outer radius.
const HEART_EDGE: Rgba = Rgba::rgb(255, 122, 168);

/// Gradient radius as a multiple of the heart size.
const HEART_GRADIENT_SPREAD: f32 = 6.0;

/// Half-extent of the heart's square base and radius of its lobes.
const HEART_LOBE: f32 = 1.2;

/// Corner radius of the square base.
const HEART_CORNER: f32 = 0.55;

/// Clear `surface` and paint every particle in store order.
pub fn draw_frame(particles: &[Particle], surface: &mut Surface) {
    surface.clear();
    for particle in particles {
        match particle.variant {
            Variant::Dust => draw_dust(surface, particle),
            Variant::Heart => draw_heart(
                surface,
                particle.x,
                particle.y,
                particle.radius,
                particle.alpha,
            ),
        }
    }
}

fn draw_dust(surface: &mut Surface, particle: &Particle) {
    let (cx, cy, r) = (particle.x, particle.y, particle.radius);
    let color = DUST_COLOR.with_alpha(particle.alpha * DUST_ALPHA_SCALE);
    surface.fill_sdf(
        (cx - r - 1.0, cy - r - 1.0, cx + r + 1.0, cy + r + 1.0),
        |x, y| circle_sdf(x - cx, y - cy, r),
        |_, _| color,
    );
}

/// Paint a heart of size `s` centred at (`cx`, `cy`).
///
/// The heart is a rounded square plus two circular lobes, rotated 45
/// degrees. Base and lobes are filled separately, so where they overlap the
/// gradient is composited twice.
fn draw_heart(surface: &mut Surface, cx: f32, cy: f32, s: f32, alpha: f32) {
    let (sin, cos) = FRAC_PI_4.sin_cos();
    let to_local = move |x: f32, y: f32| {
        let (dx, dy) = (x - cx, y - cy);
        (dx * cos + dy * sin, -dx * sin + dy * cos)
    };

    let inner = HEART_CENTER.with_alpha(alpha);
    let outer = HEART_EDGE.with_alpha(alpha * DUST_ALPHA_SCALE);
    let spread = s * HEART_GRADIENT_SPREAD;
    let gradient = move |x: f32, y: f32| {
        let (lx, ly) = to_local(x, y);
        inner.lerp(outer, (lx * lx + ly * ly).sqrt() / spread)
    };

    let reach = s * HEART_LOBE * 2.0 + 1.0;
    let bounds = (cx - reach, cy - reach, cx + reach, cy + reach);
    let lobe = s * HEART_LOBE;

    surface.fill_sdf(
        bounds,
        |x, y| {
            let (lx, ly) = to_local(x, y);
            rounded_square_sdf(lx, ly, lobe, s * HEART_CORNER)
        },
        gradient,
    );
    surface.fill_sdf(
        bounds,
        |x, y| {
            let (lx, ly) = to_local(x, y);
            circle_sdf(lx + lobe, ly, lobe).min(circle_sdf(lx, ly + lobe, lobe))
        },
        gradient,
    );
}

fn circle_sdf(dx: f32, dy: f32, r: f32) -> f32 {
    (dx * dx + dy * dy).sqrt() - r
}

/// Rounded square centred on the origin with half-extent `half`.
fn rounded_square_sdf(x: f32, y: f32, half: f32, corner: f32) -> f32 {
    let qx = x.abs() - half + corner;
    let qy = y.abs() - half + corner;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - corner
}
