//! Core types shared across the amour greeting crates.
//!
//! Viewport geometry (terminal cells measured in logical pixels), colors
//! with alpha compositing, and the easing curves used by the reveal
//! choreography.

mod color;
mod easing;
mod viewport;

pub use color::{Rgba, hsl_to_rgb};
pub use easing::{Ease, Tween, lerp};
pub use viewport::{CellSize, Viewport};
