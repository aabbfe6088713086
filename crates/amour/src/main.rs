mod app;
mod audio;
mod logging;
mod modal;
mod parallax;
mod reveal;
mod scene;

use std::io;

use amour_config::Config;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};

use crate::app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    if let Err(err) = logging::init(&config.log) {
        eprintln!("amour: logging disabled: {err}");
    }

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| App::new(config).run(terminal));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
