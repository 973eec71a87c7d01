//! # Baseline - Retro Terminal Dashboard
//!
//! System status, weather, a month calendar and a persisted task list in one
//! amber (or green, or blue) screen, driven by single keys and a `:` command
//! line.

mod app;
mod commands;
mod config;
mod constants;
mod error;
mod history;
mod input;
mod models;
mod monitor;
mod notifications;
mod tasks;
mod ui;
mod weather;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{Config, Overrides};

/// Baseline - Retro Terminal Dashboard
#[derive(Parser, Debug)]
#[command(name = "baseline", version, about = "A retro terminal dashboard with tasks, weather and system status")]
struct Cli {
    /// Color theme (amber, green, blue)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// Refresh rate in milliseconds
    #[arg(long, short = 'r')]
    refresh_rate: Option<u64>,

    /// Weather location
    #[arg(long, short = 'l')]
    location: Option<String>,

    /// Directory for tasks, history, config and the log (default ~/.baseline)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Overrides {
            theme: cli.theme,
            refresh_rate: cli.refresh_rate,
            location: cli.location,
            data_dir: cli.data_dir,
        }
    }
}

/// Send `tracing` output to the log file; the terminal belongs to the TUI.
/// Falls back to discarding output when the file cannot be opened.
fn init_logging(data_dir: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = std::fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(constants::log_file_path(data_dir))
    });
    match file {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        Err(_) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let overrides: Overrides = Cli::parse().into();

    let data_dir = Config::resolve_data_dir(&overrides);
    init_logging(&data_dir);

    let config = Config::load(&data_dir, &overrides);
    tracing::info!(
        data_dir = %config.data_dir.display(),
        theme = %config.theme,
        location = %config.weather_location,
        refresh_ms = config.refresh_interval_ms,
        weather_key = config.weather_api_key.is_some(),
        "starting baseline"
    );

    let mut app = app::App::new(&config);
    app.run().await
}
