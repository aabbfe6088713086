//! Particle field rendering for the amour greeting.
//!
//! This crate owns the drifting heart/dust particle simulation: generation
//! with an injectable random source, the per-frame update and recycling
//! step, rasterization onto an in-memory RGBA surface, and a half-block
//! widget that presents that surface in a terminal.

mod animation;
mod particle;
mod render;
mod store;
mod surface;
mod view;

pub use animation::{AnimationLoop, LoopHandle};
pub use particle::{HEART_PROBABILITY, Particle, Variant};
pub use render::draw_frame;
pub use store::{ParticleField, particle_count};
pub use surface::{MAX_PIXEL_DENSITY, Surface};
pub use view::HalfBlockView;
