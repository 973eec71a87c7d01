//! System panel: host facts, usage bars, throughput, busiest processes.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::helpers::{create_bar, fit_to_width, format_kbps, panel};
use crate::constants::{BAR_WIDTH, PROCESS_NAME_WIDTH};
use crate::models::format_uptime;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;

fn usage_line<'a>(label: &'a str, percent: f32, t: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, t.main_style()),
        Span::styled(
            format!("{} {:.1}%", create_bar(percent, BAR_WIDTH), percent),
            t.bright_style(),
        ),
    ])
}

pub fn render_system(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let mut lines = vec![Line::styled("SYSTEM STATUS", t.title_style())];

    let Some(sys) = &state.system else {
        lines.push(Line::styled("Collecting system data...", t.dim_style()));
        frame.render_widget(Paragraph::new(lines).block(panel(t, None)), area);
        return;
    };

    lines.push(Line::styled(format!("Host: {}", sys.hostname), t.main_style()));
    lines.push(Line::styled(format!("OS: {}", sys.os_name), t.main_style()));
    lines.push(Line::styled(
        format!("Uptime: {}", format_uptime(sys.uptime_secs)),
        t.main_style(),
    ));
    lines.push(Line::raw(""));
    lines.push(usage_line("CPU: ", sys.cpu_percent, t));
    lines.push(usage_line("MEM: ", sys.memory_percent, t));
    lines.push(usage_line("DSK: ", sys.disk_percent, t));
    lines.push(Line::styled(
        format!(
            "NET: ↓ {} ↑ {}",
            format_kbps(state.net.rx_per_sec),
            format_kbps(state.net.tx_per_sec)
        ),
        t.main_style(),
    ));

    lines.push(Line::raw(""));
    lines.push(Line::styled("TOP PROCESSES:", t.main_style()));
    for p in &sys.top_processes {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", fit_to_width(&p.name, PROCESS_NAME_WIDTH)),
                t.dim_style(),
            ),
            Span::styled(format!("CPU: {:.1}%", p.cpu_percent), t.main_style()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(panel(t, None)), area);
}
