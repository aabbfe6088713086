//! The application: owns every component and drives them from the
//! terminal event loop.

use std::time::{Duration, Instant};

use amour_config::Config;
use amour_core::{CellSize, Viewport};
use amour_particles::AnimationLoop;
use chrono::Local;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Position, Rect},
};
use tracing::{debug, info};

use crate::audio::{AudioCue, Autoplay, TerminalBell};
use crate::modal::{ClickTarget, ModalController};
use crate::parallax::Parallax;
use crate::reveal::{RevealEvent, RevealSequence};
use crate::scene::{Hit, Scene, SceneLayout};

/// The main application which holds the state and logic of the greeting.
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    cell: CellSize,
    /// Terminal area the layout was computed for.
    area: Rect,
    viewport: Viewport,
    animation: AnimationLoop<StdRng>,
    /// Random source for the modal heart bursts.
    rng: StdRng,
    parallax: Parallax,
    reveal: RevealSequence,
    modal: ModalController,
    modal_opened_at: Option<Instant>,
    autoplay: Autoplay,
    audio: Box<dyn AudioCue>,
    /// When the greeting finished loading.
    loaded_at: Option<Instant>,
}

impl App {
    /// Construct a new instance of [`App`] with entropy-seeded randomness.
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Construct an [`App`] whose randomness all derives from `rng`.
    pub fn with_rng(config: Config, mut rng: StdRng) -> Self {
        let cell = CellSize::new(config.display.cell_width, config.display.cell_height);
        let viewport = Viewport::new(0.0, 0.0);
        let animation = AnimationLoop::new(
            viewport,
            config.display.pixel_density,
            StdRng::from_rng(&mut rng).unwrap_or_else(|_| StdRng::seed_from_u64(0)),
        );
        let autoplay = Autoplay::new(&config.audio);

        Self {
            running: false,
            cell,
            area: Rect::default(),
            viewport,
            animation,
            rng,
            parallax: Parallax::default(),
            reveal: RevealSequence::new(),
            modal: ModalController::new(),
            modal_opened_at: None,
            autoplay,
            audio: Box::new(TerminalBell),
            loaded_at: None,
            config,
        }
    }

    /// Replace the audio cue.
    pub fn with_audio(mut self, audio: Box<dyn AudioCue>) -> Self {
        self.audio = audio;
        self
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height);
        self.on_load(Instant::now());

        let frame_interval = Duration::from_secs(1) / self.config.display.fps;
        let handle = self.animation.handle();
        self.running = true;
        while self.running && handle.is_running() {
            let frame_start = Instant::now();
            self.animation.tick();
            self.update(frame_start);
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(frame_start + frame_interval)?;
        }
        Ok(())
    }

    /// Page load: start the reveal sequence and the audio countdown.
    pub fn on_load(&mut self, now: Instant) {
        if self.reveal.trigger() {
            self.loaded_at = Some(now);
            info!(
                particles = self.animation.field().len(),
                width = self.viewport.width,
                height = self.viewport.height,
                "greeting loaded"
            );
        }
    }

    /// Rebuild everything sized to the terminal.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.area = Rect::new(0, 0, cols, rows);
        self.viewport = Viewport::from_cells(cols, rows, self.cell);
        self.animation.resize(self.viewport);
        debug!(
            cols,
            rows,
            particles = self.animation.field().len(),
            "viewport resized, particles reseeded"
        );
    }

    /// Fire due timers: reveal milestones and the audio cue.
    fn update(&mut self, now: Instant) {
        if !self.reveal.is_triggered() {
            return;
        }
        let elapsed = self.elapsed(now);
        for event in self.reveal.advance(elapsed) {
            match event {
                RevealEvent::Bloom(rose) => debug!(?rose, "rose bloomed"),
                RevealEvent::CtaShown => debug!("call to action fading in"),
                RevealEvent::CtaInteractive => info!("call to action ready"),
            }
        }
        if self.autoplay.poll(elapsed) {
            if let Err(err) = self.audio.try_play() {
                debug!(%err, "audio cue unavailable");
            }
        }
    }

    /// Time since load, zero before it.
    fn elapsed(&self, now: Instant) -> Duration {
        self.loaded_at
            .map(|loaded| now.saturating_duration_since(loaded))
            .unwrap_or_default()
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area != self.area {
            self.resize(area.width, area.height);
        }

        let now = Instant::now();
        let since_open = self
            .modal_opened_at
            .map(|opened| now.saturating_duration_since(opened))
            .unwrap_or_default();
        let scene = Scene {
            surface: self.animation.surface(),
            cell: self.cell,
            viewport: self.viewport,
            parallax: self.parallax.offset(),
            reveal: self.reveal.snapshot(self.elapsed(now)),
            modal: &self.modal,
            since_open,
            greeting: &self.config.greeting,
            date: Local::now().format("%B %d, %Y").to_string(),
        };
        frame.render_widget(scene, area);
    }

    /// Reads the crossterm events until `deadline` and updates the state of
    /// [`App`].
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        loop {
            let now = Instant::now();
            let Some(timeout) = deadline.checked_duration_since(now) else {
                return Ok(());
            };
            if !event::poll(timeout)? {
                return Ok(());
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.on_key_event(key, Instant::now())
                }
                Event::Mouse(mouse) => self.on_mouse_event(mouse, Instant::now()),
                Event::Resize(cols, rows) => self.resize(cols, rows),
                _ => {}
            }
        }
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn on_key_event(&mut self, key: KeyEvent, now: Instant) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Esc) => {
                if self.modal.on_escape() {
                    self.on_modal_closed("escape");
                }
            }
            (_, KeyCode::Enter | KeyCode::Char(' ')) if !self.modal.is_open() => {
                self.activate_cta(now)
            }
            _ => {}
        }
    }

    /// Handles pointer movement and clicks.
    pub fn on_mouse_event(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let (x, y) = self.cell.cell_center(mouse.column, mouse.row);
                self.parallax.on_pointer_move(x, y, self.viewport);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.on_click(Position::new(mouse.column, mouse.row), now)
            }
            _ => {}
        }
    }

    fn on_click(&mut self, position: Position, now: Instant) {
        let layout = SceneLayout::new(self.area, &self.config.greeting);
        match layout.hit(position, self.modal.is_open()) {
            Hit::Cta => self.activate_cta(now),
            Hit::CloseButton => {
                self.modal.close();
                self.on_modal_closed("close button");
            }
            Hit::ModalContent => {
                self.modal.on_click(ClickTarget::Content);
            }
            Hit::Backdrop => {
                if self.modal.on_click(ClickTarget::Overlay) {
                    self.on_modal_closed("backdrop");
                }
            }
            Hit::Nothing => {}
        }
    }

    /// Open the letter if the call to action is accepting input.
    fn activate_cta(&mut self, now: Instant) {
        let snapshot = self.reveal.snapshot(self.elapsed(now));
        if !snapshot.cta.interactive {
            return;
        }
        self.modal.open(self.viewport.width, &mut self.rng);
        self.modal_opened_at = Some(now);
        info!(
            hearts = self.modal.hearts().len(),
            accessible = self.modal.is_accessible(),
            scroll_locked = self.modal.is_scroll_locked(),
            "letter opened"
        );
    }

    fn on_modal_closed(&mut self, via: &str) {
        self.modal_opened_at = None;
        info!(via, "letter closed");
    }

    /// Set running to false and stop the animation loop.
    fn quit(&mut self) {
        self.running = false;
        self.animation.handle().stop();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;

    use crossterm::event::KeyEventState;

    use super::*;
    use crate::modal::ModalState;

    /// Audio cue counting attempts and always failing.
    struct CountingCue(Rc<Cell<u32>>);

    impl AudioCue for CountingCue {
        fn try_play(&mut self) -> io::Result<()> {
            self.0.set(self.0.get() + 1);
            Err(io::Error::other("autoplay blocked"))
        }
    }

    fn app() -> (App, Rc<Cell<u32>>) {
        let plays = Rc::new(Cell::new(0));
        let app = App::with_rng(Config::default(), StdRng::seed_from_u64(8))
            .with_audio(Box::new(CountingCue(plays.clone())));
        (app, plays)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_resize_reseeds_particles() {
        let (mut app, _) = app();
        app.resize(120, 40);
        assert_eq!(app.viewport, Viewport::new(960.0, 640.0));
        assert_eq!(app.animation.field().len(), 143);
        app.resize(250, 60);
        assert_eq!(app.animation.field().len(), 160);
    }

    #[test]
    fn test_cta_ignored_until_reveal_completes() {
        let (mut app, _) = app();
        app.resize(120, 40);
        let t0 = Instant::now();
        app.on_load(t0);

        app.on_key_event(key(KeyCode::Enter), t0 + Duration::from_millis(4_400));
        assert_eq!(app.modal.state(), ModalState::Closed);

        app.on_key_event(key(KeyCode::Enter), t0 + Duration::from_millis(4_600));
        assert_eq!(app.modal.state(), ModalState::Open);
        assert_eq!(app.modal.hearts().len(), 10);
    }

    #[test]
    fn test_clicks_route_to_modal() {
        let (mut app, _) = app();
        app.resize(100, 40);
        let t0 = Instant::now();
        app.on_load(t0);
        let later = t0 + Duration::from_secs(6);
        let layout = SceneLayout::new(app.area, &app.config.greeting);

        app.on_mouse_event(click(layout.cta.x + 1, layout.cta.y), later);
        assert!(app.modal.is_open());

        app.on_mouse_event(click(layout.modal.x + 2, layout.modal.y + 2), later);
        assert!(app.modal.is_open());

        app.on_mouse_event(click(0, 0), later);
        assert!(!app.modal.is_open());
        assert!(app.modal.hearts().is_empty());

        app.on_mouse_event(click(layout.cta.x + 1, layout.cta.y), later);
        app.on_mouse_event(click(layout.close_button.x, layout.close_button.y), later);
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_escape_closes_only_open_modal() {
        let (mut app, _) = app();
        app.resize(100, 40);
        let t0 = Instant::now();
        app.on_load(t0);
        let later = t0 + Duration::from_secs(6);

        app.on_key_event(key(KeyCode::Esc), later);
        assert_eq!(app.modal.state(), ModalState::Closed);
        assert!(!app.running);

        app.on_key_event(key(KeyCode::Enter), later);
        app.on_key_event(key(KeyCode::Esc), later);
        assert_eq!(app.modal.state(), ModalState::Closed);
    }

    #[test]
    fn test_pointer_moves_background() {
        let (mut app, _) = app();
        app.resize(100, 40);
        app.on_mouse_event(
            MouseEvent {
                kind: MouseEventKind::Moved,
                column: 99,
                row: 39,
                modifiers: KeyModifiers::NONE,
            },
            Instant::now(),
        );
        let (dx, dy) = app.parallax.offset();
        assert!(dx > 4.9 && dx <= 5.0);
        assert!(dy > 4.8 && dy <= 5.0);
    }

    #[test]
    fn test_audio_attempted_once_and_failure_ignored() {
        let (mut app, plays) = app();
        app.resize(80, 24);
        let t0 = Instant::now();
        app.on_load(t0);

        app.update(t0 + Duration::from_millis(100));
        assert_eq!(plays.get(), 0);
        app.update(t0 + Duration::from_millis(500));
        app.update(t0 + Duration::from_millis(900));
        assert_eq!(plays.get(), 1);
    }

    #[test]
    fn test_quit_stops_animation() {
        let (mut app, _) = app();
        app.resize(80, 24);
        let handle = app.animation.handle();
        app.on_key_event(key(KeyCode::Char('q')), Instant::now());
        assert!(!handle.is_running());
        assert!(!app.animation.tick());
    }
}
