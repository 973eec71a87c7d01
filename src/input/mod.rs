//! Key dispatch by focus.
//!
//! Keys arrive here already mapped from crossterm, so the dispatcher can be
//! driven directly from tests.

use std::collections::VecDeque;

use crate::commands;
use crate::constants::{COMMAND_HISTORY_CAPACITY, KEYS_HELP};
use crate::ui::AppState;

/// Terminal-independent key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Escape,
    Enter,
    /// Recall the next command from history.
    Tab,
    /// F5
    Refresh,
    /// Ctrl+C
    Interrupt,
}

/// Which input state owns keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Dashboard,
    Command,
    TaskEntry,
}

/// Whether the session goes on after handling an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Terminate,
}

#[derive(Debug, Default)]
pub struct InputState {
    pub focus: Focus,
    pub command_buffer: String,
    pub task_entry_buffer: String,
    command_history: VecDeque<String>,
    history_cursor: usize,
}

impl InputState {
    /// Remember a successfully parsed command line, oldest dropped first.
    pub fn record_command(&mut self, line: &str) {
        self.command_history.push_back(line.to_string());
        while self.command_history.len() > COMMAND_HISTORY_CAPACITY {
            self.command_history.pop_front();
        }
    }

    #[cfg(test)]
    pub fn command_history(&self) -> impl Iterator<Item = &str> {
        self.command_history.iter().map(String::as_str)
    }

    /// Advance the recall cursor and load that entry into the command buffer.
    fn recall_next(&mut self) {
        if self.command_history.is_empty() {
            return;
        }
        self.history_cursor = (self.history_cursor + 1) % self.command_history.len();
        if let Some(line) = self.command_history.get(self.history_cursor) {
            self.command_buffer = line.clone();
        }
    }

    fn leave_to_dashboard(&mut self) {
        self.command_buffer.clear();
        self.task_entry_buffer.clear();
        self.focus = Focus::Dashboard;
    }
}

fn is_printable(c: char) -> bool {
    !c.is_control()
}

/// Route one key to the handler for the current focus.
pub fn dispatch(state: &mut AppState, key: Key) -> Outcome {
    match key {
        Key::Interrupt => return Outcome::Terminate,
        Key::Refresh => {
            state.request_refresh();
            state.notifications.info("Data refreshed");
            return Outcome::Continue;
        }
        _ => {}
    }

    match state.input.focus {
        Focus::Command => handle_key_command(state, key),
        Focus::TaskEntry => handle_key_task_entry(state, key),
        Focus::Dashboard => handle_key_dashboard(state, key),
    }
}

fn handle_key_command(state: &mut AppState, key: Key) -> Outcome {
    let input = &mut state.input;
    match key {
        Key::Char(c) if is_printable(c) => input.command_buffer.push(c),
        Key::Backspace => {
            input.command_buffer.pop();
        }
        Key::Escape => input.leave_to_dashboard(),
        Key::Tab => input.recall_next(),
        Key::Enter => {
            let line = std::mem::take(&mut input.command_buffer);
            return commands::interpret(state, &line);
        }
        _ => {}
    }
    Outcome::Continue
}

fn handle_key_task_entry(state: &mut AppState, key: Key) -> Outcome {
    match key {
        Key::Char(c) if is_printable(c) => state.input.task_entry_buffer.push(c),
        Key::Backspace => {
            state.input.task_entry_buffer.pop();
        }
        Key::Escape => state.input.leave_to_dashboard(),
        Key::Enter => {
            let text = std::mem::take(&mut state.input.task_entry_buffer);
            if let Some(task) = state.add_task(&text) {
                state
                    .notifications
                    .success(&format!("Added todo: {}", task.text));
            }
            state.input.leave_to_dashboard();
        }
        _ => {}
    }
    Outcome::Continue
}

fn handle_key_dashboard(state: &mut AppState, key: Key) -> Outcome {
    let Key::Char(c) = key else {
        return Outcome::Continue;
    };
    match c {
        ':' => state.input.focus = Focus::Command,
        'n' => state.input.focus = Focus::TaskEntry,
        't' => {
            if let Some(i) = state.tasks.first_pending() {
                if let Some(task) = state.toggle_task(i) {
                    state
                        .notifications
                        .success(&format!("Completed: {}", task.text));
                }
            }
        }
        'd' => {
            if let Some(i) = state.tasks.first_done() {
                if let Some(task) = state.delete_task(i) {
                    state
                        .notifications
                        .success(&format!("Deleted: {}", task.text));
                }
            }
        }
        'p' => {
            if let Some(i) = state.tasks.first_pending() {
                if let Some(priority) = state.cycle_task_priority(i) {
                    state
                        .notifications
                        .success(&format!("Priority set to {}", priority));
                }
            }
        }
        'q' => return Outcome::Terminate,
        '?' => state.notifications.info(KEYS_HELP),
        _ => {}
    }
    Outcome::Continue
}
