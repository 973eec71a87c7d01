//! Renderer module: one submodule per panel.
//!
//! - `header`: Title, session date, terminal identity
//! - `system`: Host facts, usage bars, throughput, top processes
//! - `weather`: Current conditions and forecast
//! - `clock`: Time, date, month calendar
//! - `tasks`: Task list and entry line
//! - `footer`: Command prompt or latest notification
//! - `helpers`: Shared rendering utilities

mod clock;
mod footer;
mod header;
pub mod helpers;
mod system;
mod tasks;
mod weather;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::state::AppState;

/// Top-level render function. Reads state, never mutates it.
pub fn render(frame: &mut Frame, state: &AppState) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Panels
            Constraint::Length(3), // Footer
        ])
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(columns[1]);

    header::render_header(frame, main_chunks[0], state);
    system::render_system(frame, left[0], state);
    weather::render_weather(frame, left[1], state);
    clock::render_clock(frame, right[0], state);
    tasks::render_tasks(frame, right[1], state);
    footer::render_footer(frame, main_chunks[2], state);
}
