//! Footer: command prompt, or the latest notification.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::helpers::panel;
use crate::input::Focus;
use crate::ui::state::AppState;

pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let line = if state.input.focus == Focus::Command {
        Line::from(vec![
            Span::styled("> ", t.bright_style()),
            Span::styled(state.input.command_buffer.as_str(), t.main_style()),
            Span::styled("_", t.bright_style()),
        ])
    } else if let Some(n) = state.notifications.latest() {
        Line::from(vec![
            Span::styled(format!("[{}] ", n.time_label()), t.dim_style()),
            Span::styled(n.message.as_str(), t.severity_style(n.severity)),
        ])
    } else {
        Line::styled("Press ':' to enter command mode, '?' for help", t.dim_style())
    };

    frame.render_widget(Paragraph::new(line).block(panel(t, None)), area);
}
