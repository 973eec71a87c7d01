use std::time::Instant;

use crate::error::DashboardError;
use crate::history::{HistoryRecorder, HistorySample, NetThroughput};
use crate::input::InputState;
use crate::models::{Priority, SystemSnapshot, Task, WeatherPanel};
use crate::notifications::NotificationLog;
use crate::tasks::{Loaded, TaskStore};
use crate::weather::WeatherUpdate;

use super::theme::{Theme, ThemeName};

/// Central application state - the single source of truth.
///
/// Mutated only by the main loop; the renderer reads it.
pub struct AppState {
    pub input: InputState,
    pub tasks: TaskStore,
    pub notifications: NotificationLog,
    pub history: HistoryRecorder,
    pub theme: Theme,

    // ── Collaborator data ─────────────────────────────────────
    pub system: Option<SystemSnapshot>,
    pub net: NetThroughput,
    pub weather: WeatherPanel,
    pub weather_location: String,
    /// `user@host` shown in the header.
    pub terminal_id: String,

    // ── Requests for the main loop ────────────────────────────
    weather_refresh_requested: bool,
    system_refresh_requested: bool,
}

impl AppState {
    pub fn new(
        tasks: TaskStore,
        history: HistoryRecorder,
        theme: ThemeName,
        weather_location: &str,
    ) -> Self {
        Self {
            input: InputState::default(),
            tasks,
            notifications: NotificationLog::default(),
            history,
            theme: Theme::from_name(theme),
            system: None,
            net: NetThroughput::default(),
            weather: WeatherPanel::Loading {
                location: weather_location.to_string(),
            },
            weather_location: weather_location.to_string(),
            terminal_id: String::new(),
            weather_refresh_requested: false,
            system_refresh_requested: false,
        }
    }

    /// State for a new session: the welcome message, then whatever went
    /// wrong reading the task file.
    pub fn start(
        loaded: Loaded,
        history: HistoryRecorder,
        theme: ThemeName,
        weather_location: &str,
    ) -> Self {
        let (tasks, load_error) = match loaded {
            Loaded::Ok(store) => (store, None),
            Loaded::Recovered(store, e) => (store, Some(e)),
        };
        let mut state = Self::new(tasks, history, theme, weather_location);
        state.notifications.info("Welcome to Baseline");
        if let Some(e) = load_error {
            state.notifications.report(&e);
        }
        state
    }

    pub fn set_theme(&mut self, name: ThemeName) {
        self.theme = Theme::from_name(name);
    }

    pub fn set_weather_location(&mut self, location: &str) {
        self.weather_location = location.to_string();
        self.weather_refresh_requested = true;
    }

    /// Ask the main loop to refetch weather and re-collect metrics.
    pub fn request_refresh(&mut self) {
        self.weather_refresh_requested = true;
        self.system_refresh_requested = true;
    }

    /// Location to fetch, if a weather refresh is pending.
    pub fn take_weather_request(&mut self) -> Option<String> {
        std::mem::take(&mut self.weather_refresh_requested).then(|| self.weather_location.clone())
    }

    pub fn take_system_request(&mut self) -> bool {
        std::mem::take(&mut self.system_refresh_requested)
    }

    // ── Collaborator updates ──────────────────────────────────

    /// Store a fresh metrics snapshot, updating throughput and history.
    pub fn record_system(&mut self, snapshot: SystemSnapshot, now: Instant) {
        self.net.update(snapshot.total_rx, snapshot.total_tx, now);
        let sample =
            HistorySample::from_snapshot(&snapshot, chrono::Local::now().format("%H:%M:%S").to_string());
        if let Some(Err(e)) = self.history.maybe_sample(now, &sample) {
            self.notifications.report(&e);
        }
        self.system = Some(snapshot);
    }

    pub fn apply_weather(&mut self, update: WeatherUpdate) {
        // A fetch for a location the user has since replaced is stale.
        if update.requested == self.weather_location {
            self.weather = update.panel;
        }
    }

    // ── Write-through task mutations ──────────────────────────
    //
    // Each helper mutates the store, persists it, and turns any failure into
    // an error notification. In-memory state stays authoritative when the
    // write fails.

    fn with_tasks<T>(
        &mut self,
        op: impl FnOnce(&mut TaskStore) -> Result<T, DashboardError>,
    ) -> Option<T> {
        match op(&mut self.tasks) {
            Ok(value) => {
                if let Err(e) = self.tasks.save() {
                    self.notifications.report(&e);
                }
                Some(value)
            }
            Err(e) => {
                self.notifications.report(&e);
                None
            }
        }
    }

    /// Append a task; `None` when the text is blank (nothing is persisted).
    pub fn add_task(&mut self, text: &str) -> Option<Task> {
        if text.trim().is_empty() {
            return None;
        }
        self.with_tasks(|tasks| Ok(tasks.add(text).cloned()))
            .flatten()
    }

    pub fn toggle_task(&mut self, index: usize) -> Option<Task> {
        self.with_tasks(|tasks| tasks.toggle(index).cloned())
    }

    pub fn delete_task(&mut self, index: usize) -> Option<Task> {
        self.with_tasks(|tasks| tasks.delete(index))
    }

    pub fn cycle_task_priority(&mut self, index: usize) -> Option<Priority> {
        self.with_tasks(|tasks| tasks.cycle_priority(index))
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    AppState::new(
        TaskStore::in_memory(Task::seed()),
        HistoryRecorder::in_memory(),
        ThemeName::Amber,
        "Lahore",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, WeatherReport};

    // ── Write-through ─────────────────────────────────────────────

    #[test]
    fn mutations_are_persisted_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let Loaded::Ok(store) = TaskStore::load(&path) else {
            panic!("fresh dir should load seed");
        };
        let mut state = AppState::new(store, HistoryRecorder::in_memory(), ThemeName::Amber, "x");

        state.add_task("write tests");
        let Loaded::Ok(reloaded) = TaskStore::load(&path) else {
            panic!("saved file should load");
        };
        assert_eq!(reloaded.len(), 5);
        assert_eq!(reloaded.tasks()[4].text, "write tests");

        state.delete_task(0);
        let Loaded::Ok(reloaded) = TaskStore::load(&path) else {
            panic!("saved file should load");
        };
        assert_eq!(reloaded.len(), 4);
        assert_eq!(reloaded.tasks()[0].text, "Debug terminal interface");
    }

    #[test]
    fn failed_save_keeps_memory_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let Loaded::Ok(store) = TaskStore::load(&path) else {
            panic!("fresh dir should load seed");
        };
        let mut state = AppState::new(store, HistoryRecorder::in_memory(), ThemeName::Amber, "x");
        // A directory where the file should be makes every save fail.
        std::fs::create_dir(&path).unwrap();

        assert!(state.add_task("abc").is_some());
        assert_eq!(state.tasks.len(), 5);
        assert_eq!(state.tasks.tasks()[4].text, "abc");
        let n = state.notifications.latest().unwrap();
        assert_eq!(n.severity, Severity::Error);
        assert!(n.message.starts_with("Error saving"), "{}", n.message);
    }

    #[test]
    fn index_error_becomes_notification() {
        let mut state = test_state();
        assert!(state.toggle_task(10).is_none());
        let n = state.notifications.latest().unwrap();
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.message, "Invalid todo index: 11");
    }

    #[test]
    fn blank_add_is_silent() {
        let mut state = test_state();
        assert!(state.add_task("  ").is_none());
        assert!(state.notifications.is_empty());
        assert_eq!(state.tasks.len(), 4);
    }

    // ── Session start ─────────────────────────────────────────────

    #[test]
    fn start_reports_malformed_task_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        std::fs::write(&path, "[{not json").unwrap();

        let state = AppState::start(
            TaskStore::load(&path),
            HistoryRecorder::in_memory(),
            ThemeName::Amber,
            "Lahore",
        );
        assert!(state.tasks.is_empty());
        let messages: Vec<(&str, Severity)> = state
            .notifications
            .iter()
            .map(|n| (n.message.as_str(), n.severity))
            .collect();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ("Welcome to Baseline", Severity::Info));
        assert_eq!(messages[1].1, Severity::Error);
        assert!(messages[1].0.starts_with("Error loading todos:"), "{}", messages[1].0);
    }

    #[test]
    fn start_with_missing_file_only_welcomes() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::start(
            TaskStore::load(&dir.path().join("todos.json")),
            HistoryRecorder::in_memory(),
            ThemeName::Amber,
            "Lahore",
        );
        assert_eq!(state.tasks.len(), 4);
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications.latest().unwrap().message, "Welcome to Baseline");
    }

    // ── Refresh requests ──────────────────────────────────────────

    #[test]
    fn weather_request_is_taken_once() {
        let mut state = test_state();
        assert_eq!(state.take_weather_request(), None);
        state.set_weather_location("paris");
        assert_eq!(state.take_weather_request(), Some("paris".to_string()));
        assert_eq!(state.take_weather_request(), None);
    }

    #[test]
    fn refresh_requests_both() {
        let mut state = test_state();
        state.request_refresh();
        assert!(state.take_system_request());
        assert!(!state.take_system_request());
        assert_eq!(state.take_weather_request(), Some("Lahore".to_string()));
    }

    // ── Collaborator updates ──────────────────────────────────────

    #[test]
    fn stale_weather_is_ignored() {
        let mut state = test_state();
        state.set_weather_location("paris");
        state.apply_weather(WeatherUpdate {
            requested: "Lahore".to_string(),
            panel: WeatherPanel::Sample(WeatherReport::sample("Lahore")),
        });
        assert!(matches!(state.weather, WeatherPanel::Loading { .. }));
        state.apply_weather(WeatherUpdate {
            requested: "paris".to_string(),
            panel: WeatherPanel::Live(WeatherReport::sample("Paris")),
        });
        assert!(matches!(state.weather, WeatherPanel::Live(_)));
    }

    #[test]
    fn record_system_samples_history() {
        let mut state = test_state();
        let snap = SystemSnapshot {
            cpu_percent: 12.5,
            memory_percent: 40.0,
            total_rx: 1000,
            total_tx: 500,
            ..Default::default()
        };
        state.record_system(snap, Instant::now());
        assert_eq!(state.history.history().cpu, vec![12.5]);
        assert!(state.system.is_some());
    }
}
