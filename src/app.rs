//! Application struct and event loop.
//!
//! Owns the terminal, state, metrics collector, and weather worker.
//! Keys are mapped to [`Key`] here and handed to [`input::dispatch`].

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Config;
use crate::constants::*;
use crate::history::HistoryRecorder;
use crate::input::{self, Key, Outcome};
use crate::monitor::{terminal_id, SystemCollector};
use crate::tasks::TaskStore;
use crate::ui::{self, AppState};
use crate::weather::{spawn_worker, WeatherClient, WeatherWorker};

type DashboardTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Main application struct.
///
/// Owns all runtime resources: terminal, state, data collectors, channels.
pub struct App {
    state: AppState,
    collector: SystemCollector,
    weather: WeatherWorker,
    tick: Duration,
    last_system_refresh: Option<Instant>,
}

impl App {
    /// Load persisted data and start the weather worker.
    ///
    /// Must be called inside the tokio runtime.
    pub fn new(config: &Config) -> Self {
        let tasks = TaskStore::load(&tasks_file_path(&config.data_dir));
        let history = HistoryRecorder::load(&history_file_path(&config.data_dir));

        let mut state = AppState::start(tasks, history, config.theme, &config.weather_location);

        let client = WeatherClient::new(config.weather_api_key.clone());
        if !client.has_key() {
            state
                .notifications
                .info("Weather API key not set. Using sample data.");
        }
        let weather = spawn_worker(
            client,
            config.weather_location.clone(),
            Duration::from_secs(config.weather_refresh_secs),
        );

        let collector = SystemCollector::new();

        Self {
            state,
            collector,
            weather,
            tick: Duration::from_millis(config.refresh_interval_ms.max(MIN_REFRESH_MS)),
            last_system_refresh: None,
        }
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        // Terminal init
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        // Cleanup runs even when the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        tracing::info!("session ended");
        result
    }

    fn event_loop(&mut self, terminal: &mut DashboardTerminal) -> Result<()> {
        self.refresh_system(Instant::now());
        if let Some(sys) = &self.state.system {
            self.state.terminal_id = terminal_id(&sys.hostname);
        }

        loop {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            self.drain_weather_events();

            if event::poll(self.tick)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(key) = map_key(key) {
                        if input::dispatch(&mut self.state, key) == Outcome::Terminate {
                            break;
                        }
                    }
                }
            }

            self.tick_refresh();
        }
        Ok(())
    }

    // ── Channel draining ─────────────────────────────────────────

    fn drain_weather_events(&mut self) {
        while let Ok(update) = self.weather.updates.try_recv() {
            self.state.apply_weather(update);
        }
    }

    // ── Timers ───────────────────────────────────────────────────

    fn tick_refresh(&mut self) {
        let now = Instant::now();

        let due = self
            .last_system_refresh
            .map_or(true, |at| now.duration_since(at) >= Duration::from_millis(SYSTEM_REFRESH_MS));
        if self.state.take_system_request() || due {
            self.refresh_system(now);
        }

        if let Some(location) = self.state.take_weather_request() {
            tracing::info!(%location, "weather refetch requested");
            if self.weather.requests.send(location).is_err() {
                tracing::warn!("weather worker is gone");
            }
        }
    }

    fn refresh_system(&mut self, now: Instant) {
        let snapshot = self.collector.collect();
        self.state.record_system(snapshot, now);
        self.last_system_refresh = Some(now);
    }
}

/// Translate a crossterm key into the dashboard's key set.
///
/// Only presses count; release and repeat events are dropped.
pub fn map_key(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Interrupt)
        }
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::F(5) => Some(Key::Refresh),
        _ => None,
    }
}
