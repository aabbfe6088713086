//! Configuration for the amour greeting.
//!
//! Settings live in a TOML file at `$AMOUR_CONFIG`, or `config.toml` in the
//! platform config directory. Every section is optional and a missing file
//! means defaults.

mod error;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "AMOUR_CONFIG";

/// Accepted log level names.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Highest supported frame rate.
const MAX_FPS: u32 = 240;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub greeting: GreetingConfig,
    pub display: DisplayConfig,
    pub audio: AudioConfig,
    pub log: LogConfig,
}

/// Words shown on the page and in the letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
    pub title: String,
    pub subtitle: String,
    /// Label of the call-to-action button.
    pub cta_label: String,
    /// Salutation at the top of the letter.
    pub recipient: String,
    /// Letter body, one paragraph per entry.
    pub letter: Vec<String>,
    pub signature: String,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            title: "Happy Valentine's Day".to_string(),
            subtitle: "a little something, just for you".to_string(),
            cta_label: "Open your letter".to_string(),
            recipient: "My Love".to_string(),
            letter: vec![
                "Every day with you feels like the first warm morning of spring.".to_string(),
                "Thank you for the laughter, the patience, and the quiet moments in between."
                    .to_string(),
                "Will you be my Valentine?".to_string(),
            ],
            signature: "Forever yours".to_string(),
        }
    }
}

/// How terminal cells map to logical pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Logical pixels per cell column.
    pub cell_width: f32,
    /// Logical pixels per cell row.
    pub cell_height: f32,
    /// Device pixels per logical pixel for the particle surface, capped at 2.
    pub pixel_density: f32,
    /// Animation frames per second.
    pub fps: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
            pixel_density: 0.25,
            fps: 60,
        }
    }
}

/// The best-effort audio cue played shortly after start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Delay after start before the cue is attempted.
    pub delay_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: 500,
        }
    }
}

/// Log output. Logs go to a file so they never draw over the screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// Log file; defaults to `amour.log` in the platform data directory.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Configured log file, or the default location if one exists.
    pub fn resolved_file(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_local_dir().join("amour.log")))
    }
}

impl Config {
    /// Load from `$AMOUR_CONFIG` or the default location.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`, using defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents, path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse and validate TOML read from `path`.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let display = &self.display;
        if !is_positive(display.cell_width) {
            return Err(invalid("display.cell_width", "must be greater than zero"));
        }
        if !is_positive(display.cell_height) {
            return Err(invalid("display.cell_height", "must be greater than zero"));
        }
        if !is_positive(display.pixel_density) {
            return Err(invalid("display.pixel_density", "must be greater than zero"));
        }
        if display.fps == 0 || display.fps > MAX_FPS {
            return Err(invalid(
                "display.fps",
                format!("must be between 1 and {MAX_FPS}"),
            ));
        }
        if !LOG_LEVELS.contains(&self.log.level.to_ascii_lowercase().as_str()) {
            return Err(invalid(
                "log.level",
                format!("expected one of {}", LOG_LEVELS.join(", ")),
            ));
        }
        Ok(())
    }

    /// Config file location: `$AMOUR_CONFIG`, else the platform config dir.
    pub fn config_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| project_dirs().map(|dirs| dirs.config_dir().join("config.toml")))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "amour")
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
