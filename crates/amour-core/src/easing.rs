//! Easing curves and delayed tweens.

use std::time::Duration;

/// Easing curve applied to a tween's linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    #[default]
    Linear,
    /// Cubic ease-out.
    Power2Out,
    /// Quartic ease-out.
    Power3Out,
}

impl Ease {
    /// Map linear progress `t` in `0.0..=1.0` through the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// A one-shot transition that starts after `delay` and lasts `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub delay: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

impl Tween {
    pub const fn new(delay: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            delay,
            duration,
            ease,
        }
    }

    /// Eased progress at `elapsed` since the sequence started.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed < self.delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = (elapsed - self.delay).as_secs_f32() / self.duration.as_secs_f32();
        self.ease.apply(t)
    }

    /// Whether the tween has begun.
    pub fn has_started(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay
    }

    /// Whether the tween has reached its end state.
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.end()
    }

    /// Time at which the tween settles.
    pub fn end(&self) -> Duration {
        self.delay + self.duration
    }
}

/// Linear interpolation between `from` and `to`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::Power2Out, Ease::Power3Out] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_ease_out_front_loads_motion() {
        assert!(Ease::Power3Out.apply(0.5) > Ease::Power2Out.apply(0.5));
        assert!(Ease::Power2Out.apply(0.5) > Ease::Linear.apply(0.5));
    }

    #[test]
    fn test_tween_progress_respects_delay() {
        let tween = Tween::new(
            Duration::from_millis(500),
            Duration::from_millis(1000),
            Ease::Linear,
        );
        assert_eq!(tween.progress(Duration::from_millis(400)), 0.0);
        assert!((tween.progress(Duration::from_millis(1000)) - 0.5).abs() < 1e-6);
        assert_eq!(tween.progress(Duration::from_secs(5)), 1.0);
        assert!(!tween.is_complete(Duration::from_millis(1499)));
        assert!(tween.is_complete(Duration::from_millis(1500)));
    }
}
