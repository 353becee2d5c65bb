mod app;
mod command;
mod config;
mod consts;
mod game;
mod menu;
mod model;
mod scores;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::model::{HighScores, SnakeGame};
use crate::util::ErrorChain;
use crate::warning::Warning;
use anyhow::Context;
use simplelog::{LevelFilter, WriteLogger};
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut warnings = Vec::new();
    let (config, config_err) = match Config::default_path().and_then(|p| Config::load(&p, true)) {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };
    match config.log_file() {
        Some(path) => {
            if let Err(e) = init_logging(&path) {
                warnings.push(Warning::from_error(&*e));
            }
        }
        None => warnings.push(Warning::from_error(&io::Error::other(
            "could not determine path for log file",
        ))),
    }
    log::info!("Starting gridsnake {}", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_err {
        log::warn!("Using default configuration: {}", ErrorChain(&e));
        warnings.insert(0, Warning::from_error(&e));
    }
    let high_scores = match config.high_scores_file() {
        Some(path) => HighScores::load(path),
        None => {
            log::warn!("Could not determine high scores path; scores will not be saved");
            HighScores::in_memory()
        }
    };
    log::info!("Loaded {} high score(s)", high_scores.len());
    let game = SnakeGame::new(config.board(), high_scores);
    let terminal = ratatui::init();
    let r = App::new(game).with_warnings(warnings).run(terminal);
    ratatui::restore();
    io_exit(r)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file)
        .context("failed to initialize logger")?;
    Ok(())
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal I/O failed: {e}");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
