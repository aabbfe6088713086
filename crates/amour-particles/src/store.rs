//! Fixed-size particle field, rebuilt on resize.

use amour_core::Viewport;
use rand::Rng;

use crate::particle::Particle;

/// Base particle count before the width bonus.
const BASE_COUNT: usize = 90;

/// Upper bound on the particle count.
const MAX_COUNT: usize = 160;

/// One extra particle per this many logical pixels of width.
const WIDTH_PER_PARTICLE: f32 = 18.0;

/// Number of particles kept alive for a viewport `width` pixels wide.
pub fn particle_count(width: f32) -> usize {
    let bonus = (width.max(0.0) / WIDTH_PER_PARTICLE).floor() as usize;
    (BASE_COUNT + bonus).min(MAX_COUNT)
}

/// The particle store.
///
/// Holds exactly [`particle_count`] particles for its viewport. Particles are
/// never removed; those leaving the screen are replaced in place.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Viewport,
}

impl ParticleField {
    /// Create a field seeded for `viewport`.
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            viewport,
        };
        field.reseed(viewport, rng);
        field
    }

    /// Discard every particle and scatter a fresh set across `viewport`.
    pub fn reseed<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        self.viewport = viewport;
        self.particles.clear();
        let count = particle_count(viewport.width);
        self.particles
            .extend((0..count).map(|_| Particle::generate(rng, viewport, true)));
    }

    /// Advance every particle one frame, recycling those that left the screen.
    ///
    /// Returns how many particles were recycled.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let viewport = self.viewport;
        let mut recycled = 0;
        for particle in &mut self.particles {
            particle.advance();
            if particle.is_out_of_bounds(viewport) {
                *particle = Particle::generate(rng, viewport, false);
                recycled += 1;
            }
        }
        recycled
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_particle_count_formula() {
        assert_eq!(particle_count(0.0), 90);
        assert_eq!(particle_count(17.9), 90);
        assert_eq!(particle_count(18.0), 91);
        assert_eq!(particle_count(900.0), 140);
        assert_eq!(particle_count(1260.0), 160);
        assert_eq!(particle_count(4000.0), 160);
    }

    #[test]
    fn test_reseed_matches_count_for_any_width() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = ParticleField::new(Viewport::new(320.0, 480.0), &mut rng);
        for width in [0.0, 100.0, 375.0, 800.0, 1280.0, 1920.0, 3840.0] {
            field.reseed(Viewport::new(width, 600.0), &mut rng);
            assert_eq!(field.len(), particle_count(width));
            assert!(field.len() >= 90);
            assert!(field.len() <= 160);
        }
    }

    #[test]
    fn test_velocity_stays_upward_across_frames() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ParticleField::new(Viewport::new(640.0, 320.0), &mut rng);
        for _ in 0..2_000 {
            field.step(&mut rng);
            assert!(field.particles().iter().all(|p| p.vy < 0.0));
        }
        assert_eq!(field.len(), particle_count(640.0));
    }

    #[test]
    fn test_out_of_bounds_slot_respawns_from_below() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = ParticleField::new(viewport, &mut rng);

        field.particles_mut()[0].y = -45.0;
        field.particles_mut()[1].x = -70.0;
        field.particles_mut()[2].x = 870.0;
        field.particles_mut()[2].vx = 0.0;
        field.particles_mut()[2].drift = 0.0;
        let untouched = field.particles()[3].clone();

        let recycled = field.step(&mut rng);

        assert!(recycled >= 3);
        for p in &field.particles()[..3] {
            assert!(p.y >= viewport.height);
            assert!((0.0..=viewport.width).contains(&p.x));
        }
        assert!((field.particles()[3].y - (untouched.y + untouched.vy)).abs() < 1e-4);
    }
}
