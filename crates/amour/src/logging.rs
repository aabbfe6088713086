//! Log file setup.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use amour_config::LogConfig;
use color_eyre::eyre::{WrapErr, eyre};
use tracing_subscriber::filter::LevelFilter;

/// Install a `tracing` subscriber writing to the configured log file.
///
/// Logs never go to the terminal, which is busy drawing the greeting.
/// Does nothing when the level is `off` or no log location is known.
pub fn init(config: &LogConfig) -> color_eyre::Result<()> {
    let level = parse_level(&config.level)?;
    if level == LevelFilter::OFF {
        return Ok(());
    }
    let Some(path) = config.resolved_file() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}

fn parse_level(name: &str) -> color_eyre::Result<LevelFilter> {
    name.parse::<LevelFilter>()
        .wrap_err_with(|| format!("unknown log level `{name}`"))
}
