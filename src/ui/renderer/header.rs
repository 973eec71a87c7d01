//! Header bar: title, session date, terminal identity.

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::helpers::panel;
use crate::ui::state::AppState;

pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let today = chrono::Local::now().format("%Y-%m-%d");

    let line = Line::from(vec![
        Span::styled("BASELINE", t.main_style().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(
            format!("[Session: {}] [Terminal: {}]", today, state.terminal_id),
            t.dim_style(),
        ),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line).block(panel(t, None)), area);
}
