//! The one-shot entrance choreography: roses bloom, then the call to
//! action fades in.
//!
//! Everything is a pure function of the time since the sequence was
//! triggered, so the renderer asks for a [`RevealSnapshot`] each frame and
//! the app drains [`RevealEvent`]s to observe each milestone exactly once.

use std::time::Duration;

use amour_core::{Ease, Tween, lerp};

/// Delay between successive rose blooms.
const BLOOM_STAGGER: Duration = Duration::from_millis(180);

/// When the call to action starts fading in.
const CTA_DELAY: Duration = Duration::from_millis(3400);

/// How long the call-to-action fade takes.
const CTA_FADE: Duration = Duration::from_millis(1100);

/// The three decorative roses, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rose {
    Left,
    Right,
    Bottom,
}

impl Rose {
    pub const ALL: [Rose; 3] = [Rose::Left, Rose::Right, Rose::Bottom];

    fn index(self) -> usize {
        match self {
            Rose::Left => 0,
            Rose::Right => 1,
            Rose::Bottom => 2,
        }
    }

    /// When this rose receives its bloom activation.
    pub fn bloom_at(self) -> Duration {
        BLOOM_STAGGER * self.index() as u32
    }

    fn motion(self) -> Motion {
        match self {
            Rose::Left => Motion {
                tween: Tween::new(Duration::ZERO, Duration::from_millis(1800), Ease::Power2Out),
                from: Visual::new(0.0, 0.9, 0.0),
                to: Visual::new(0.6, 1.0, 0.0),
            },
            Rose::Right => Motion {
                tween: Tween::new(
                    Duration::from_millis(120),
                    Duration::from_millis(1600),
                    Ease::Power3Out,
                ),
                from: Visual::new(0.0, 1.0, 18.0),
                to: Visual::new(1.0, 1.0, 0.0),
            },
            Rose::Bottom => Motion {
                tween: Tween::new(
                    Duration::from_millis(200),
                    Duration::from_millis(1800),
                    Ease::Power3Out,
                ),
                from: Visual::new(0.0, 1.0, 24.0),
                to: Visual::new(1.0, 1.0, 0.0),
            },
        }
    }
}

/// Opacity, scale and vertical offset (logical pixels, positive is down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub opacity: f32,
    pub scale: f32,
    pub offset_y: f32,
}

impl Visual {
    const fn new(opacity: f32, scale: f32, offset_y: f32) -> Self {
        Self {
            opacity,
            scale,
            offset_y,
        }
    }
}

/// A tweened transition between two visual states.
struct Motion {
    tween: Tween,
    from: Visual,
    to: Visual,
}

impl Motion {
    fn at(&self, elapsed: Duration) -> Visual {
        let t = self.tween.progress(elapsed);
        Visual {
            opacity: lerp(self.from.opacity, self.to.opacity, t),
            scale: lerp(self.from.scale, self.to.scale, t),
            offset_y: lerp(self.from.offset_y, self.to.offset_y, t),
        }
    }
}

fn cta_motion() -> Motion {
    Motion {
        tween: Tween::new(CTA_DELAY, CTA_FADE, Ease::Power3Out),
        from: Visual::new(0.0, 1.0, 14.0),
        to: Visual::new(1.0, 1.0, 0.0),
    }
}

/// Moment from which the call to action accepts input.
pub fn cta_interactive_at() -> Duration {
    cta_motion().tween.end()
}

/// State of one rose at a point in the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoseState {
    pub bloomed: bool,
    pub visual: Visual,
}

/// State of the call to action at a point in the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CtaState {
    pub visual: Visual,
    /// Whether clicks and keys reach the button.
    pub interactive: bool,
}

/// Everything the renderer needs from the choreography for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSnapshot {
    roses: [RoseState; 3],
    pub cta: CtaState,
}

impl RevealSnapshot {
    pub fn rose(&self, rose: Rose) -> RoseState {
        self.roses[rose.index()]
    }
}

/// Milestones of the choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    Bloom(Rose),
    CtaShown,
    CtaInteractive,
}

/// The entrance sequence. Triggered once; there is no cancel or replay.
#[derive(Debug, Default)]
pub struct RevealSequence {
    triggered: bool,
    bloomed: [bool; 3],
    cta_shown: bool,
    cta_interactive: bool,
}

impl RevealSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the sequence. Returns `false` if it was already started.
    pub fn trigger(&mut self) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Milestones reached by `elapsed` that have not been reported yet.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        if !self.triggered {
            return events;
        }

        for rose in Rose::ALL {
            let fired = &mut self.bloomed[rose.index()];
            if !*fired && elapsed >= rose.bloom_at() {
                *fired = true;
                events.push(RevealEvent::Bloom(rose));
            }
        }

        let cta = cta_motion();
        if !self.cta_shown && cta.tween.has_started(elapsed) {
            self.cta_shown = true;
            events.push(RevealEvent::CtaShown);
        }
        if !self.cta_interactive && elapsed >= cta_interactive_at() {
            self.cta_interactive = true;
            events.push(RevealEvent::CtaInteractive);
        }

        events
    }

    /// Visual state at `elapsed` since the trigger. Before the trigger,
    /// everything is hidden.
    pub fn snapshot(&self, elapsed: Duration) -> RevealSnapshot {
        let roses = Rose::ALL.map(|rose| {
            if self.triggered {
                RoseState {
                    bloomed: elapsed >= rose.bloom_at(),
                    visual: rose.motion().at(elapsed),
                }
            } else {
                RoseState {
                    bloomed: false,
                    visual: rose.motion().from,
                }
            }
        });

        let motion = cta_motion();
        let cta = if self.triggered {
            CtaState {
                visual: motion.at(elapsed),
                interactive: elapsed >= cta_interactive_at(),
            }
        } else {
            CtaState {
                visual: motion.from,
                interactive: false,
            }
        };

        RevealSnapshot { roses, cta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_trigger_is_one_shot() {
        let mut reveal = RevealSequence::new();
        assert!(reveal.trigger());
        assert!(!reveal.trigger());
        assert!(reveal.is_triggered());
    }

    #[test]
    fn test_nothing_happens_before_trigger() {
        let mut reveal = RevealSequence::new();
        assert!(reveal.advance(ms(10_000)).is_empty());
        let snapshot = reveal.snapshot(ms(10_000));
        assert!(!snapshot.cta.interactive);
        assert_eq!(snapshot.cta.visual.opacity, 0.0);
        assert!(Rose::ALL.iter().all(|r| !snapshot.rose(*r).bloomed));
    }

    #[test]
    fn test_blooms_are_staggered_in_order() {
        let mut reveal = RevealSequence::new();
        reveal.trigger();
        assert_eq!(reveal.advance(ms(0)), vec![RevealEvent::Bloom(Rose::Left)]);
        assert!(reveal.advance(ms(179)).is_empty());
        assert_eq!(reveal.advance(ms(180)), vec![RevealEvent::Bloom(Rose::Right)]);
        assert_eq!(reveal.advance(ms(360)), vec![RevealEvent::Bloom(Rose::Bottom)]);
        assert!(reveal.advance(ms(1_000)).is_empty());
    }

    #[test]
    fn test_each_milestone_fires_once_even_when_late() {
        let mut reveal = RevealSequence::new();
        reveal.trigger();
        let events = reveal.advance(ms(6_000));
        assert_eq!(
            events,
            vec![
                RevealEvent::Bloom(Rose::Left),
                RevealEvent::Bloom(Rose::Right),
                RevealEvent::Bloom(Rose::Bottom),
                RevealEvent::CtaShown,
                RevealEvent::CtaInteractive,
            ]
        );
        assert!(reveal.advance(ms(9_000)).is_empty());
    }

    #[test]
    fn test_cta_interactive_only_after_fade_completes() {
        let mut reveal = RevealSequence::new();
        reveal.trigger();
        assert_eq!(cta_interactive_at(), ms(4_500));

        for millis in (0..4_500).step_by(10) {
            assert!(!reveal.snapshot(ms(millis)).cta.interactive, "at {millis}ms");
        }
        assert!(reveal.snapshot(ms(4_500)).cta.interactive);

        assert!(!reveal.advance(ms(4_499)).contains(&RevealEvent::CtaInteractive));
        assert_eq!(reveal.advance(ms(4_500)), vec![RevealEvent::CtaInteractive]);
    }

    #[test]
    fn test_cta_fades_in_from_below() {
        let mut reveal = RevealSequence::new();
        reveal.trigger();

        let hidden = reveal.snapshot(ms(3_399)).cta.visual;
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.offset_y, 14.0);

        let midway = reveal.snapshot(ms(3_950)).cta.visual;
        assert!(midway.opacity > 0.5 && midway.opacity < 1.0);
        assert!(midway.offset_y > 0.0 && midway.offset_y < 14.0);

        let settled = reveal.snapshot(ms(4_500)).cta.visual;
        assert_eq!(settled.opacity, 1.0);
        assert_eq!(settled.offset_y, 0.0);
    }

    #[test]
    fn test_roses_settle() {
        let mut reveal = RevealSequence::new();
        reveal.trigger();
        let early = reveal.snapshot(ms(0));
        assert_eq!(early.rose(Rose::Left).visual.scale, 0.9);
        assert_eq!(early.rose(Rose::Right).visual.offset_y, 18.0);

        let settled = reveal.snapshot(ms(2_000));
        let left = settled.rose(Rose::Left).visual;
        assert!((left.opacity - 0.6).abs() < 1e-6);
        assert_eq!(left.scale, 1.0);
        assert_eq!(settled.rose(Rose::Right).visual.opacity, 1.0);
        assert_eq!(settled.rose(Rose::Bottom).visual.offset_y, 0.0);
        assert!(Rose::ALL.iter().all(|r| settled.rose(*r).bloomed));
    }

    #[test]
    fn test_right_rose_waits_for_its_delay() {
        let mut reveal = RevealSequence::new();
        reveal.trigger();
        let snapshot = reveal.snapshot(ms(100));
        assert_eq!(snapshot.rose(Rose::Right).visual.opacity, 0.0);
        assert!(snapshot.rose(Rose::Left).visual.opacity > 0.0);
    }
}
