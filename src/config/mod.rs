use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::*;
use crate::ui::ThemeName;
use crate::weather::usable_api_key;

/// Application configuration with sensible defaults.
///
/// Layered lowest to highest: built-in defaults, `<data_dir>/config.toml`,
/// environment (including `.env` files), command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where tasks, history, the config file and the log live.
    pub data_dir: PathBuf,
    /// Render tick in milliseconds
    pub refresh_interval_ms: u64,
    /// Weather refetch interval in seconds
    pub weather_refresh_secs: u64,
    /// weatherapi.com key; `None` shows sample weather
    pub weather_api_key: Option<String>,
    pub weather_location: String,
    pub theme: ThemeName,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            refresh_interval_ms: DEFAULT_REFRESH_MS,
            weather_refresh_secs: DEFAULT_WEATHER_REFRESH_SECS,
            weather_api_key: None,
            weather_location: DEFAULT_WEATHER_LOCATION.to_string(),
            theme: ThemeName::default(),
        }
    }
}

/// Command-line values that take precedence over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub theme: Option<String>,
    pub refresh_rate: Option<u64>,
    pub location: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// TOML-deserializable config file format.
/// All fields are optional; missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    refresh_interval_ms: Option<u64>,
    weather_refresh_secs: Option<u64>,
    weather_api_key: Option<String>,
    weather_location: Option<String>,
    theme: Option<String>,
}

/// Parse a theme name, keeping `current` (with a warning) when unknown.
fn resolve_theme(name: &str, current: ThemeName) -> ThemeName {
    match name.parse() {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!("{}; keeping {}", e, current);
            current
        }
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl Config {
    /// Resolve the data directory: `--data-dir`, then `BASELINE_DATA_DIR`
    /// (including a `.env` in the working directory), then `~/.baseline`.
    ///
    /// Needed before [`Config::load`] so logging can start first.
    pub fn resolve_data_dir(overrides: &Overrides) -> PathBuf {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        overrides
            .data_dir
            .clone()
            .or_else(|| non_empty(std::env::var("BASELINE_DATA_DIR").ok()).map(PathBuf::from))
            .unwrap_or_else(default_data_dir)
    }

    /// Build the full configuration for `data_dir`.
    pub fn load(data_dir: &Path, overrides: &Overrides) -> Self {
        let _ = dotenvy::from_path(env_file_path(data_dir));

        let mut config = Config {
            data_dir: data_dir.to_path_buf(),
            ..Config::default()
        };
        config.apply_file(&config_file_path(data_dir));
        config.apply_env(|key| std::env::var(key).ok());
        config.apply_overrides(overrides);
        config
    }

    /// Merge `config.toml` values over the current ones. A missing file is
    /// silently skipped; an unparsable one is logged and ignored.
    fn apply_file(&mut self, path: &Path) {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return, // No config file, keep defaults
        };
        match toml::from_str::<FileConfig>(&content) {
            Ok(fc) => self.merge_file(fc),
            Err(e) => tracing::warn!(
                "Failed to parse {}: {}. Using defaults.",
                path.display(),
                e
            ),
        }
    }

    fn merge_file(&mut self, fc: FileConfig) {
        if let Some(v) = fc.refresh_interval_ms {
            self.refresh_interval_ms = v.max(MIN_REFRESH_MS);
        }
        if let Some(v) = fc.weather_refresh_secs {
            self.weather_refresh_secs = v.max(MIN_WEATHER_REFRESH_SECS);
        }
        if let Some(v) = usable_api_key(fc.weather_api_key.as_deref()) {
            self.weather_api_key = Some(v);
        }
        if let Some(v) = non_empty(fc.weather_location) {
            self.weather_location = v;
        }
        if let Some(v) = non_empty(fc.theme) {
            self.theme = resolve_theme(&v, self.theme);
        }
    }

    /// Merge environment variables, read through `lookup`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = usable_api_key(lookup("WEATHER_API_KEY").as_deref()) {
            self.weather_api_key = Some(v);
        }
        if let Some(v) = non_empty(lookup("WEATHER_LOCATION")) {
            self.weather_location = v;
        }
        if let Some(v) = non_empty(lookup("THEME")) {
            self.theme = resolve_theme(&v, self.theme);
        }
    }

    fn apply_overrides(&mut self, o: &Overrides) {
        if let Some(rate) = o.refresh_rate {
            self.refresh_interval_ms = rate.max(MIN_REFRESH_MS);
        }
        if let Some(v) = non_empty(o.location.clone()) {
            self.weather_location = v;
        }
        if let Some(v) = &o.theme {
            self.theme = resolve_theme(v, self.theme);
        }
    }
}
