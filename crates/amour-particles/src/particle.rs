//! Particle generation and motion.

use std::f32::consts::TAU;

use amour_core::Viewport;
use rand::Rng;

/// Chance that a freshly generated particle is a heart.
pub const HEART_PROBABILITY: f32 = 0.18;

/// Maximum distance below the bottom edge at which particles respawn.
const RESPAWN_OVERSHOOT: f32 = 120.0;

/// Phase advance per frame, in radians.
const PHASE_STEP: f32 = 0.02;

/// Sway contribution factor applied to `sin(phase) * drift`.
const SWAY_FACTOR: f32 = 0.03;

/// Particles above this line are recycled.
const TOP_MARGIN: f32 = 40.0;

/// Particles this far past either side are recycled.
const SIDE_MARGIN: f32 = 60.0;

/// Particle kind, which selects the size range and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Dust,
    Heart,
}

/// A single drifting particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position in logical pixels.
    pub x: f32,
    /// Vertical position in logical pixels.
    pub y: f32,
    /// Radius, 2.0-5.0 for hearts and 1.0-3.2 for dust.
    pub radius: f32,
    pub variant: Variant,
    /// Lateral velocity per frame.
    pub vx: f32,
    /// Vertical velocity per frame, always negative.
    pub vy: f32,
    /// Opacity, 0.10-0.45.
    pub alpha: f32,
    /// Signed sway amplitude.
    pub drift: f32,
    /// Sway angle accumulator.
    pub phase: f32,
    /// Tint hue in degrees, 330-360. Not used when drawing.
    pub hue: f32,
}

impl Particle {
    /// Generate a particle for `viewport`.
    ///
    /// With `spawn_anywhere` the particle starts at a random height inside
    /// the viewport (initial seeding); otherwise it starts just below the
    /// bottom edge so the field keeps flowing upward.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        viewport: Viewport,
        spawn_anywhere: bool,
    ) -> Self {
        let variant = if unit(rng) < HEART_PROBABILITY {
            Variant::Heart
        } else {
            Variant::Dust
        };
        let x = unit(rng) * viewport.width;
        let y = if spawn_anywhere {
            unit(rng) * viewport.height
        } else {
            viewport.height + unit(rng) * RESPAWN_OVERSHOOT
        };
        let radius = match variant {
            Variant::Heart => 2.0 + unit(rng) * 3.0,
            Variant::Dust => 1.0 + unit(rng) * 2.2,
        };

        Self {
            x,
            y,
            radius,
            variant,
            vx: (unit(rng) - 0.5) * 0.18,
            vy: -(0.18 + unit(rng) * 0.55),
            alpha: 0.10 + unit(rng) * 0.35,
            drift: (unit(rng) - 0.5) * 0.7,
            phase: unit(rng) * TAU,
            hue: 330.0 + unit(rng) * 30.0,
        }
    }

    /// Advance one frame: sway sideways and drift upward.
    pub fn advance(&mut self) {
        self.phase += PHASE_STEP;
        let sway = self.phase.sin() * self.drift;
        self.x += self.vx + sway * SWAY_FACTOR;
        self.y += self.vy;
    }

    /// Whether the particle has left the visible region and must be recycled.
    pub fn is_out_of_bounds(&self, viewport: Viewport) -> bool {
        self.y < -TOP_MARGIN || self.x < -SIDE_MARGIN || self.x > viewport.width + SIDE_MARGIN
    }
}

/// Uniform sample in `0.0..1.0`.
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..1.0)
}
