//! Task panel: entry line, priority-sorted rows, key help.

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::helpers::panel;
use crate::input::Focus;
use crate::ui::state::AppState;

pub fn render_tasks(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let mut lines = Vec::new();

    if state.input.focus == Focus::TaskEntry {
        lines.push(Line::styled("NEW TASK:", t.bright_style()));
        lines.push(Line::from(vec![
            Span::styled(state.input.task_entry_buffer.as_str(), t.main_style()),
            Span::styled("_", t.bright_style()),
        ]));
        lines.push(Line::raw(""));
    }

    // Rows are numbered by storage position so `todo toggle <n>` matches.
    for (index, task) in state.tasks.display_order() {
        let (status, status_style, text_style) = if task.done {
            (
                "[X] ",
                t.bright_style(),
                t.dim_style().add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            ("[ ] ", t.main_style(), t.main_style())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:2} ", index + 1), t.dim_style()),
            Span::styled(
                format!("[{}] ", task.priority.marker()),
                t.priority_style(task.priority),
            ),
            Span::styled(status, status_style),
            Span::styled(task.text.as_str(), text_style),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("[N]ew [T]oggle [D]elete [P]riority [Q]uit", t.dim_style()).centered());

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel(t, Some("TASK LIST"))),
        area,
    );
}
