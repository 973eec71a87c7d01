//! Application-wide constants.
//!
//! Centralizes capacities, timing defaults and on-disk locations.

use std::path::PathBuf;

// ── Timing ────────────────────────────────────────────────────────
/// Minimum allowed render tick (ms) to prevent excessive CPU usage.
pub const MIN_REFRESH_MS: u64 = 100;
/// Default render tick (ms).
pub const DEFAULT_REFRESH_MS: u64 = 250;
/// How often system metrics are re-collected (ms).
pub const SYSTEM_REFRESH_MS: u64 = 2000;
/// Minimum spacing between accepted history samples (seconds).
pub const HISTORY_SAMPLE_SECS: f64 = 5.0;
/// Default weather refetch interval (seconds).
pub const DEFAULT_WEATHER_REFRESH_SECS: u64 = 15 * 60;
/// Floor for the weather refetch interval (seconds).
pub const MIN_WEATHER_REFRESH_SECS: u64 = 60;
/// HTTP timeout for the weather API (seconds).
pub const WEATHER_HTTP_TIMEOUT_SECS: u64 = 10;

// ── Capacities ────────────────────────────────────────────────────
/// Points kept per history stream.
pub const HISTORY_CAPACITY: usize = 60;
/// Notifications kept in the log.
pub const NOTIFICATION_CAPACITY: usize = 5;
/// Command lines kept for Tab recall.
pub const COMMAND_HISTORY_CAPACITY: usize = 20;
/// Processes listed in the system panel.
pub const TOP_PROCESS_COUNT: usize = 3;

// ── UI Layout ─────────────────────────────────────────────────────
/// Width of the text usage bars, in cells.
pub const BAR_WIDTH: usize = 15;
/// Columns reserved for a process name in the system panel.
pub const PROCESS_NAME_WIDTH: usize = 15;

// ── Weather ───────────────────────────────────────────────────────
/// weatherapi.com "current conditions" endpoint.
pub const WEATHER_API_URL: &str = "https://api.weatherapi.com/v1/current.json";
/// Location used when nothing is configured.
pub const DEFAULT_WEATHER_LOCATION: &str = "Lahore";
/// Placeholder key shipped in example `.env` files; treated as unset.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

// ── Help texts ────────────────────────────────────────────────────
pub const COMMANDS_HELP: &str = "Commands: help, todo, weather, clear, exit, theme, shortcut";
pub const KEYS_HELP: &str =
    "Keys: n(new), t(toggle), d(delete), p(priority), q(quit), :(command)";
pub const SHORTCUTS_HELP: &str = "Shortcuts: n:New TODO, t:Toggle TODO, d:Delete TODO, \
     p:Change Priority, q:Quit, ::Command Mode, ?:Show Help, Tab:History, F5:Refresh Data";

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to the current directory.
pub fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns `~/.baseline/`, home of the config, data files and log.
pub fn default_data_dir() -> PathBuf {
    home_dir().join(".baseline")
}

/// Returns `<dir>/config.toml`.
pub fn config_file_path(dir: &std::path::Path) -> PathBuf {
    dir.join("config.toml")
}

/// Returns `<dir>/.env`.
pub fn env_file_path(dir: &std::path::Path) -> PathBuf {
    dir.join(".env")
}

/// Returns `<dir>/todos.json`.
pub fn tasks_file_path(dir: &std::path::Path) -> PathBuf {
    dir.join("todos.json")
}

/// Returns `<dir>/system_history.json`.
pub fn history_file_path(dir: &std::path::Path) -> PathBuf {
    dir.join("system_history.json")
}

/// Returns `<dir>/baseline.log`.
pub fn log_file_path(dir: &std::path::Path) -> PathBuf {
    dir.join("baseline.log")
}
