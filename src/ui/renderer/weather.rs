//! Weather panel: current conditions and the static forecast.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::helpers::panel;
use crate::models::{WeatherPanel, WeatherReport, SAMPLE_FORECAST};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;

const CLOUD_ART: [&str; 4] = [
    "    \\  /",
    "  _ /\"\".-.",
    "    \\_(   ).",
    "    /(___(__)",
];

fn report_lines(r: &WeatherReport, t: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::styled(format!("Location: {}", r.location), t.main_style()),
        Line::styled(format!("Temperature: {}°C", r.temp_c), t.main_style()),
        Line::styled(format!("Condition: {}", r.condition), t.main_style()),
        Line::styled(format!("Humidity: {}%", r.humidity), t.dim_style()),
        Line::styled(format!("Wind: {} km/h", r.wind_kph), t.dim_style()),
    ]
}

pub fn render_weather(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let mut lines = vec![Line::styled("WEATHER REPORT", t.title_style())];

    let updated = match &state.weather {
        WeatherPanel::Loading { .. } => {
            lines.push(Line::styled(
                format!("Location: {}", state.weather.location()),
                t.main_style(),
            ));
            lines.push(Line::styled("Fetching weather...", t.dim_style()));
            None
        }
        WeatherPanel::Sample(r) => {
            lines.extend(report_lines(r, t));
            lines.push(Line::raw(""));
            lines.push(Line::styled("Set WEATHER_API_KEY in .env file", t.dim_style()));
            lines.push(Line::raw(""));
            lines.extend(CLOUD_ART.iter().map(|row| Line::styled(*row, t.bright_style())));
            Some(r.updated)
        }
        WeatherPanel::Live(r) => {
            lines.extend(report_lines(r, t));
            Some(r.updated)
        }
        WeatherPanel::Unavailable { error, updated, .. } => {
            lines.push(Line::styled("Weather data unavailable", t.main_style()));
            lines.push(Line::styled(format!("ERROR: {}", error), t.dim_style()));
            Some(*updated)
        }
    };

    lines.push(Line::raw(""));
    lines.push(Line::styled("FORECAST:", t.main_style()));
    for (hour, temp) in SAMPLE_FORECAST {
        lines.push(Line::styled(format!("{}: {}", hour, temp), t.dim_style()));
    }

    if let Some(at) = updated {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("Updated: {}", at.format("%H:%M:%S")),
            t.dim_style(),
        ));
    }

    frame.render_widget(Paragraph::new(lines).block(panel(t, None)), area);
}
