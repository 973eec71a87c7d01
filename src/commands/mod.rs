//! The `:` command line.
//!
//! Lines are trimmed and lower-cased before parsing. Sub-keywords match whole
//! words, so `todo address` is not `todo add ress`.

use crate::constants::{COMMANDS_HELP, SHORTCUTS_HELP};
use crate::error::DashboardError;
use crate::input::{Focus, Outcome};
use crate::ui::{AppState, ThemeName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Clear,
    Shortcuts,
    Theme(ThemeName),
    AddTask(String),
    /// 1-based task number.
    ToggleTask(usize),
    /// 1-based task number.
    DeleteTask(usize),
    SetWeatherLocation(String),
}

/// Remainder of `line` after the whole word `kw`, or `None` when `line`
/// starts with something else.
fn keyword<'a>(line: &'a str, kw: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(kw)?;
    if rest.is_empty() {
        Some(rest)
    } else if rest.starts_with(' ') {
        Some(rest.trim_start())
    } else {
        None
    }
}

fn task_number(arg: &str) -> Result<usize, DashboardError> {
    let arg = arg.trim();
    arg.parse().map_err(|_| {
        // All digits but too big for usize: still a position, just out of range.
        if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
            DashboardError::validation(format!("Invalid todo index: {}", arg))
        } else {
            DashboardError::validation("Invalid todo index")
        }
    })
}

impl Command {
    /// Parse a normalized line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, DashboardError> {
        let line = line.trim();
        let cmd = match line {
            "" => return Ok(None),
            "help" | "?" => Command::Help,
            "exit" | "quit" => Command::Exit,
            "clear" => Command::Clear,
            "shortcut" => Command::Shortcuts,
            _ => {
                if let Some(name) = keyword(line, "theme") {
                    Command::Theme(name.parse()?)
                } else if let Some(rest) = keyword(line, "todo") {
                    Self::parse_todo(line, rest)?
                } else if let Some(rest) = keyword(line, "weather") {
                    match keyword(rest, "set") {
                        Some(location) if !location.is_empty() => {
                            Command::SetWeatherLocation(location.to_string())
                        }
                        Some(_) => {
                            return Err(DashboardError::validation("Usage: weather set <location>"))
                        }
                        None => return Err(unknown(line)),
                    }
                } else {
                    return Err(unknown(line));
                }
            }
        };
        Ok(Some(cmd))
    }

    fn parse_todo(line: &str, rest: &str) -> Result<Command, DashboardError> {
        if let Some(text) = keyword(rest, "add") {
            Ok(Command::AddTask(text.to_string()))
        } else if let Some(arg) = keyword(rest, "toggle") {
            Ok(Command::ToggleTask(task_number(arg)?))
        } else if let Some(arg) = keyword(rest, "delete") {
            Ok(Command::DeleteTask(task_number(arg)?))
        } else {
            Err(unknown(line))
        }
    }

    /// `todo add` with nothing to add.
    fn is_noop(&self) -> bool {
        matches!(self, Command::AddTask(text) if text.trim().is_empty())
    }

    pub fn execute(self, state: &mut AppState) -> Outcome {
        tracing::info!(command = ?self, "executing command");
        match self {
            Command::Help => state.notifications.info(COMMANDS_HELP),
            Command::Exit => return Outcome::Terminate,
            Command::Clear => state.notifications.clear(),
            Command::Shortcuts => state.notifications.info(SHORTCUTS_HELP),
            Command::Theme(name) => {
                state.set_theme(name);
                state
                    .notifications
                    .success(&format!("Theme changed to {}", name));
            }
            Command::AddTask(text) => {
                if let Some(task) = state.add_task(&text) {
                    state
                        .notifications
                        .success(&format!("Added todo: {}", task.text));
                }
            }
            Command::ToggleTask(n) => {
                if n == 0 {
                    state.notifications.report(&DashboardError::Index { position: 0 });
                } else if state.toggle_task(n - 1).is_some() {
                    state
                        .notifications
                        .success(&format!("Toggled todo #{}", n));
                }
            }
            Command::DeleteTask(n) => {
                if n == 0 {
                    state.notifications.report(&DashboardError::Index { position: 0 });
                } else if let Some(task) = state.delete_task(n - 1) {
                    state
                        .notifications
                        .success(&format!("Deleted todo: {}", task.text));
                }
            }
            Command::SetWeatherLocation(location) => {
                state.set_weather_location(&location);
                state
                    .notifications
                    .success(&format!("Weather location set to: {}", location));
            }
        }
        Outcome::Continue
    }
}

fn unknown(line: &str) -> DashboardError {
    DashboardError::validation(format!("Unknown command: {}", line))
}

/// Run one submitted command line against `state`.
///
/// Clears the command buffer and hands focus back to the dashboard.
pub fn interpret(state: &mut AppState, raw: &str) -> Outcome {
    let line = raw.trim().to_lowercase();
    state.input.command_buffer.clear();
    state.input.focus = Focus::Dashboard;

    match Command::parse(&line) {
        Ok(Some(cmd)) => {
            if !cmd.is_noop() {
                state.input.record_command(&line);
            }
            cmd.execute(state)
        }
        Ok(None) => Outcome::Continue,
        Err(e) => {
            state.notifications.report(&e);
            Outcome::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, Task};
    use crate::ui::state::test_state;

    fn latest(state: &AppState) -> (String, Severity) {
        let n = state.notifications.latest().expect("a notification");
        (n.message.clone(), n.severity)
    }

    // ── Parsing ───────────────────────────────────────────────────

    #[test]
    fn parse_exact_words() {
        assert_eq!(Command::parse("help").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("?").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("quit").unwrap(), Some(Command::Exit));
        assert_eq!(Command::parse("shortcut").unwrap(), Some(Command::Shortcuts));
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn parse_requires_whole_words() {
        assert!(Command::parse("helpme").is_err());
        assert!(Command::parse("themes green").is_err());
        assert!(Command::parse("todo address").is_err());
        assert_eq!(
            Command::parse("todo add  buy milk").unwrap(),
            Some(Command::AddTask("buy milk".to_string()))
        );
    }

    #[test]
    fn parse_task_numbers() {
        assert_eq!(
            Command::parse("todo toggle 3").unwrap(),
            Some(Command::ToggleTask(3))
        );
        assert_eq!(
            Command::parse("todo delete 1").unwrap(),
            Some(Command::DeleteTask(1))
        );
        let err = Command::parse("todo toggle abc").unwrap_err();
        assert_eq!(err.to_string(), "Invalid todo index");
        assert!(Command::parse("todo delete").is_err());
    }

    #[test]
    fn oversized_task_number_echoes_argument() {
        let err = Command::parse("todo toggle 99999999999999999999999").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid todo index: 99999999999999999999999"
        );
        let err = Command::parse("todo delete -3").unwrap_err();
        assert_eq!(err.to_string(), "Invalid todo index");
    }

    #[test]
    fn parse_weather_set() {
        assert_eq!(
            Command::parse("weather set new york").unwrap(),
            Some(Command::SetWeatherLocation("new york".to_string()))
        );
        let err = Command::parse("weather set").unwrap_err();
        assert_eq!(err.to_string(), "Usage: weather set <location>");
        assert!(Command::parse("weather").is_err());
    }

    // ── Interpreting ──────────────────────────────────────────────

    #[test]
    fn todo_add_appends_medium_pending() {
        let mut state = test_state();
        interpret(&mut state, "todo add buy milk");
        assert_eq!(state.tasks.tasks().last(), Some(&Task::new("buy milk")));
        assert_eq!(
            latest(&state),
            ("Added todo: buy milk".to_string(), Severity::Success)
        );
    }

    #[test]
    fn todo_add_empty_is_silent() {
        let mut state = test_state();
        interpret(&mut state, "todo add   ");
        assert_eq!(state.tasks.len(), 4);
        assert!(state.notifications.is_empty());
        assert_eq!(state.input.command_history().count(), 0);
    }

    #[test]
    fn todo_toggle_out_of_range_leaves_list() {
        let mut state = test_state();
        let before = state.tasks.tasks().to_vec();
        interpret(&mut state, "todo toggle 99");
        let (msg, severity) = latest(&state);
        assert_eq!(severity, Severity::Error);
        assert!(msg.contains("99"));
        assert_eq!(state.tasks.tasks(), before.as_slice());
    }

    #[test]
    fn todo_toggle_zero_is_invalid() {
        let mut state = test_state();
        interpret(&mut state, "todo toggle 0");
        assert_eq!(
            latest(&state),
            ("Invalid todo index: 0".to_string(), Severity::Error)
        );
    }

    #[test]
    fn todo_toggle_and_delete() {
        let mut state = test_state();
        interpret(&mut state, "todo toggle 1");
        assert!(state.tasks.tasks()[0].done);
        assert_eq!(latest(&state).0, "Toggled todo #1");

        interpret(&mut state, "todo delete 2");
        assert_eq!(state.tasks.len(), 3);
        assert_eq!(latest(&state).0, "Deleted todo: Debug terminal interface");
    }

    #[test]
    fn theme_switch_is_case_insensitive() {
        let mut state = test_state();
        interpret(&mut state, "THEME GREEN");
        assert_eq!(state.theme.name, ThemeName::Green);
        assert_eq!(latest(&state).0, "Theme changed to green");
    }

    #[test]
    fn unknown_theme_keeps_current() {
        let mut state = test_state();
        interpret(&mut state, "theme purple");
        assert_eq!(state.theme.name, ThemeName::Amber);
        assert_eq!(
            latest(&state),
            (
                "Unknown theme: purple. Available: amber, green, blue".to_string(),
                Severity::Error
            )
        );
    }

    #[test]
    fn blank_line_changes_nothing() {
        let mut state = test_state();
        state.input.focus = Focus::Command;
        state.input.command_buffer = "  ".to_string();
        assert_eq!(interpret(&mut state, "  "), Outcome::Continue);
        assert!(state.notifications.is_empty());
        assert_eq!(state.input.command_history().count(), 0);
        assert_eq!(state.input.focus, Focus::Dashboard);
        assert!(state.input.command_buffer.is_empty());
    }

    #[test]
    fn unknown_command_is_reported_not_recorded() {
        let mut state = test_state();
        interpret(&mut state, "Frobnicate");
        assert_eq!(
            latest(&state),
            ("Unknown command: frobnicate".to_string(), Severity::Error)
        );
        assert_eq!(state.input.command_history().count(), 0);
    }

    #[test]
    fn parsed_commands_are_recorded_lowercased() {
        let mut state = test_state();
        interpret(&mut state, "  HELP ");
        interpret(&mut state, "exit");
        let history: Vec<&str> = state.input.command_history().collect();
        assert_eq!(history, vec!["help", "exit"]);
    }

    #[test]
    fn exit_terminates() {
        let mut state = test_state();
        assert_eq!(interpret(&mut state, "exit"), Outcome::Terminate);
        assert_eq!(interpret(&mut state, "quit"), Outcome::Terminate);
    }

    #[test]
    fn clear_leaves_confirmation() {
        let mut state = test_state();
        interpret(&mut state, "help");
        interpret(&mut state, "clear");
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(
            latest(&state),
            ("Notifications cleared".to_string(), Severity::Success)
        );
    }

    #[test]
    fn weather_set_requests_refetch() {
        let mut state = test_state();
        interpret(&mut state, "weather set Paris");
        assert_eq!(state.weather_location, "paris");
        assert_eq!(state.take_weather_request(), Some("paris".to_string()));
        assert_eq!(latest(&state).0, "Weather location set to: paris");
    }
}
