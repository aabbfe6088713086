//! The per-frame animation loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use amour_core::Viewport;
use rand::Rng;

use crate::render::draw_frame;
use crate::store::ParticleField;
use crate::surface::Surface;

/// Shared stop flag for an [`AnimationLoop`].
#[derive(Debug, Clone)]
pub struct LoopHandle {
    running: Arc<AtomicBool>,
}

impl LoopHandle {
    fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Ask the loop to stop before its next frame.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Whether the loop will keep producing frames.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Owns the particle field, its surface and random source, and advances
/// them one frame at a time.
///
/// The host decides when frames happen (the terminal event loop calls
/// [`AnimationLoop::tick`] once per frame interval). Tests drive it with
/// [`AnimationLoop::run_frames`] and a seeded random source.
#[derive(Debug)]
pub struct AnimationLoop<R> {
    field: ParticleField,
    surface: Surface,
    rng: R,
    handle: LoopHandle,
    frames: u64,
}

impl<R: Rng> AnimationLoop<R> {
    /// Seed a field for `viewport` and allocate its surface.
    pub fn new(viewport: Viewport, density: f32, mut rng: R) -> Self {
        let field = ParticleField::new(viewport, &mut rng);
        Self {
            field,
            surface: Surface::new(viewport, density),
            rng,
            handle: LoopHandle::new(),
            frames: 0,
        }
    }

    /// Handle that can stop this loop.
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Advance and draw one frame.
    ///
    /// Returns `false` without touching any state once the loop has been
    /// stopped; otherwise `true`, meaning the next frame should be scheduled.
    pub fn tick(&mut self) -> bool {
        if !self.handle.is_running() {
            return false;
        }
        self.field.step(&mut self.rng);
        draw_frame(self.field.particles(), &mut self.surface);
        self.frames += 1;
        true
    }

    /// Run up to `frames` frames, stopping early if the loop is stopped.
    /// Returns how many frames ran.
    pub fn run_frames(&mut self, frames: u64) -> u64 {
        let mut ran = 0;
        while ran < frames && self.tick() {
            ran += 1;
        }
        ran
    }

    /// Make a stopped loop runnable again. Existing handles observe it.
    pub fn restart(&mut self) {
        self.handle.running.store(true, Ordering::Release);
    }

    /// Reallocate the surface and reseed the field for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        self.field.reseed(viewport, &mut self.rng);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Frames advanced since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::store::particle_count;

    fn seeded(seed: u64) -> AnimationLoop<StdRng> {
        AnimationLoop::new(Viewport::new(800.0, 400.0), 0.5, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_frames_are_deterministic_for_a_seed() {
        let mut a = seeded(99);
        let mut b = seeded(99);
        a.run_frames(300);
        b.run_frames(300);
        assert_eq!(a.field().particles(), b.field().particles());
    }

    #[test]
    fn test_tick_draws_and_counts() {
        let mut animation = seeded(1);
        assert!(animation.surface().is_blank());
        assert!(animation.tick());
        assert_eq!(animation.frames(), 1);
        assert!(!animation.surface().is_blank());
    }

    #[test]
    fn test_stopped_loop_does_not_advance() {
        let mut animation = seeded(2);
        animation.run_frames(10);
        let before = animation.field().particles().to_vec();

        let handle = animation.handle();
        handle.stop();
        assert!(!handle.is_running());
        assert!(!animation.tick());
        assert_eq!(animation.run_frames(50), 0);
        assert_eq!(animation.frames(), 10);
        assert_eq!(animation.field().particles(), before.as_slice());

        animation.restart();
        assert!(handle.is_running());
        assert_eq!(animation.run_frames(5), 5);
        assert_eq!(animation.frames(), 15);
    }

    #[test]
    fn test_resize_reseeds_field_and_surface() {
        let mut animation = seeded(3);
        animation.resize(Viewport::new(2000.0, 900.0));
        assert_eq!(animation.field().len(), particle_count(2000.0));
        assert_eq!(animation.surface().width(), 1000);
        assert_eq!(animation.surface().height(), 450);
    }

    #[test]
    fn test_population_is_stable_over_long_runs() {
        let mut animation = seeded(4);
        let count = animation.field().len();
        animation.run_frames(5_000);
        assert_eq!(animation.field().len(), count);
        let height = animation.field().viewport().height;
        assert!(
            animation
                .field()
                .particles()
                .iter()
                .all(|p| p.y >= -40.0 && p.y <= height + 120.0)
        );
    }
}
