//! Best-effort audio cue attempted shortly after start.

use std::io::{self, Write};
use std::time::Duration;

use amour_config::AudioConfig;

/// Something that can try to play the greeting's sound.
///
/// Failure is expected on many hosts and is never shown to the user.
pub trait AudioCue {
    fn try_play(&mut self) -> io::Result<()>;
}

/// Rings the terminal bell.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn try_play(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }
}

/// Fires the audio cue once, a fixed delay after start.
#[derive(Debug, Clone)]
pub struct Autoplay {
    delay: Duration,
    pending: bool,
}

impl Autoplay {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.delay_ms),
            pending: config.enabled,
        }
    }

    /// Whether the cue is due at `elapsed` since start. True at most once.
    pub fn poll(&mut self, elapsed: Duration) -> bool {
        if self.pending && elapsed >= self.delay {
            self.pending = false;
            return true;
        }
        false
    }
}
