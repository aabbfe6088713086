//! The letter modal: a two-state toggle that spawns a burst of floating
//! hearts each time it opens.

use std::time::Duration;

use rand::Rng;

/// Fewest hearts spawned on open.
const MIN_HEARTS: usize = 8;

/// Most hearts spawned on open.
const MAX_HEARTS: usize = 14;

/// One heart per this many logical pixels of viewport width.
const WIDTH_PER_HEART: f32 = 90.0;

/// Number of hearts spawned when the modal opens on a viewport this wide.
pub fn heart_count(width: f32) -> usize {
    ((width.max(0.0) / WIDTH_PER_HEART).floor() as usize).clamp(MIN_HEARTS, MAX_HEARTS)
}

/// A decorative heart inside the open modal.
///
/// Values describe the starting point; the float-up animation that makes it
/// visible is applied by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalHeart {
    /// Horizontal position as a percentage of the modal width, 8-92.
    pub left_percent: f32,
    /// Vertical start offset from the modal bottom, -10..10 logical pixels.
    pub bottom_px: f32,
    /// Animation delay, 0-1.6 s.
    pub delay: Duration,
    /// Lateral drift over one float, whole logical pixels in -30..=30.
    pub drift_px: f32,
    /// Size factor, 0.75-1.30 in steps of 0.01.
    pub scale: f32,
    /// Initial opacity; always zero.
    pub opacity: f32,
}

impl ModalHeart {
    fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            left_percent: 8.0 + rng.gen_range(0.0..1.0_f32) * 84.0,
            bottom_px: -10.0 + rng.gen_range(0.0..1.0_f32) * 20.0,
            delay: Duration::from_secs_f32(rng.gen_range(0.0..1.0_f32) * 1.6),
            drift_px: ((rng.gen_range(0.0..1.0_f32) - 0.5) * 60.0).round(),
            scale: ((0.75 + rng.gen_range(0.0..1.0_f32) * 0.55) * 100.0).round() / 100.0,
            opacity: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// What a click inside the overlay landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed backdrop itself.
    Overlay,
    /// Anything inside the modal box.
    Content,
}

/// Open/closed state plus everything toggled with it.
#[derive(Debug)]
pub struct ModalController {
    state: ModalState,
    overlay_shown: bool,
    modal_shown: bool,
    aria_hidden: bool,
    scroll_locked: bool,
    hearts: Vec<ModalHeart>,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            overlay_shown: false,
            modal_shown: false,
            aria_hidden: true,
            scroll_locked: false,
            hearts: Vec::new(),
        }
    }

    /// Show the modal and spawn a fresh burst of hearts sized for a
    /// viewport `viewport_width` logical pixels wide.
    pub fn open<R: Rng + ?Sized>(&mut self, viewport_width: f32, rng: &mut R) {
        self.state = ModalState::Open;
        self.overlay_shown = true;
        self.aria_hidden = false;
        self.modal_shown = true;
        self.scroll_locked = true;

        self.hearts.clear();
        let count = heart_count(viewport_width);
        self.hearts
            .extend((0..count).map(|_| ModalHeart::generate(rng)));
    }

    /// Hide the modal and drop every heart immediately.
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
        self.modal_shown = false;
        self.overlay_shown = false;
        self.aria_hidden = true;
        self.scroll_locked = false;
        self.hearts.clear();
    }

    /// Handle a click on the overlay layer. Only a click on the backdrop
    /// itself closes the modal. Returns whether it closed.
    pub fn on_click(&mut self, target: ClickTarget) -> bool {
        if self.is_open() && target == ClickTarget::Overlay {
            self.close();
            return true;
        }
        false
    }

    /// Handle Escape. Closes an open modal; does nothing when closed.
    pub fn on_escape(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.close();
        true
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn hearts(&self) -> &[ModalHeart] {
        &self.hearts
    }

    pub fn is_overlay_shown(&self) -> bool {
        self.overlay_shown
    }

    pub fn is_modal_shown(&self) -> bool {
        self.modal_shown
    }

    /// Whether assistive technology should see the overlay.
    pub fn is_accessible(&self) -> bool {
        !self.aria_hidden
    }

    /// Whether the page behind the modal is prevented from scrolling.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use rstest::rstest;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(14)
    }

    #[rstest]
    #[case(900.0, 10)]
    #[case(2000.0, 14)]
    #[case(500.0, 8)]
    #[case(0.0, 8)]
    #[case(1079.0, 11)]
    fn test_heart_count(#[case] width: f32, #[case] expected: usize) {
        assert_eq!(heart_count(width), expected);

        let mut modal = ModalController::new();
        modal.open(width, &mut rng());
        assert_eq!(modal.hearts().len(), expected);
    }

    #[test]
    fn test_starts_closed_and_hidden() {
        let modal = ModalController::new();
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!modal.is_overlay_shown());
        assert!(!modal.is_accessible());
        assert!(!modal.is_scroll_locked());
        assert!(modal.hearts().is_empty());
    }

    #[test]
    fn test_open_shows_everything() {
        let mut modal = ModalController::new();
        modal.open(900.0, &mut rng());
        assert_eq!(modal.state(), ModalState::Open);
        assert!(modal.is_overlay_shown());
        assert!(modal.is_modal_shown());
        assert!(modal.is_accessible());
        assert!(modal.is_scroll_locked());
    }

    #[test]
    fn test_heart_attributes_in_range() {
        let mut modal = ModalController::new();
        let mut rng = rng();
        for _ in 0..50 {
            modal.open(1200.0, &mut rng);
            for heart in modal.hearts() {
                assert!((8.0..=92.0).contains(&heart.left_percent));
                assert!((-10.0..=10.0).contains(&heart.bottom_px));
                assert!(heart.delay <= Duration::from_secs_f32(1.6));
                assert!((-30.0..=30.0).contains(&heart.drift_px));
                assert_eq!(heart.drift_px, heart.drift_px.round());
                assert!((0.75..=1.30).contains(&heart.scale));
                assert_eq!(heart.opacity, 0.0);
            }
        }
    }

    #[test]
    fn test_close_discards_hearts() {
        let mut modal = ModalController::new();
        modal.open(900.0, &mut rng());
        modal.close();
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(modal.hearts().is_empty());
        assert!(!modal.is_overlay_shown());
        assert!(!modal.is_modal_shown());
        assert!(!modal.is_accessible());
        assert!(!modal.is_scroll_locked());
    }

    #[test]
    fn test_reopen_replaces_hearts() {
        let mut modal = ModalController::new();
        let mut rng = rng();
        modal.open(2000.0, &mut rng);
        modal.open(500.0, &mut rng);
        assert_eq!(modal.hearts().len(), 8);
    }

    #[test]
    fn test_backdrop_click_closes_content_click_does_not() {
        let mut modal = ModalController::new();
        modal.open(900.0, &mut rng());

        assert!(!modal.on_click(ClickTarget::Content));
        assert!(modal.is_open());

        assert!(modal.on_click(ClickTarget::Overlay));
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(modal.hearts().is_empty());
    }

    #[test]
    fn test_escape_only_acts_when_open() {
        let mut modal = ModalController::new();
        assert!(!modal.on_escape());
        assert_eq!(modal.state(), ModalState::Closed);

        modal.open(900.0, &mut rng());
        assert!(modal.on_escape());
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(modal.hearts().is_empty());

        assert!(!modal.on_escape());
    }
}
