//! Time panel: clock, long date, month calendar, upcoming events.

use chrono::{Datelike, Local, NaiveDate};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::helpers::panel;
use crate::ui::state::AppState;

/// Static sample agenda.
const UPCOMING: [(&str, &str); 3] = [
    ("14:00", "Team Meeting"),
    ("16:30", "Project Review"),
    ("Tomorrow", "Deadline: Report"),
];

/// Monday-first weeks of `date`'s month; `None` pads days outside it.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let first = date.with_day(1).unwrap_or(date);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let days = next_month
        .map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31);

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut col = first.weekday().num_days_from_monday() as usize;
    for day in 1..=days {
        week[col] = Some(day);
        col += 1;
        if col == 7 {
            weeks.push(week);
            week = [None; 7];
            col = 0;
        }
    }
    if col > 0 {
        weeks.push(week);
    }
    weeks
}

fn week_text(week: &[Option<u32>; 7], today: u32) -> String {
    week.iter()
        .map(|d| match d {
            None => "   ".to_string(),
            Some(d) if *d == today => format!("{:2}*", d),
            Some(d) => format!("{:2} ", d),
        })
        .collect()
}

pub fn render_clock(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let now = Local::now();
    let today = now.date_naive();

    let mut lines = vec![
        Line::styled(
            now.format("%H:%M:%S").to_string(),
            t.title_style().add_modifier(Modifier::ITALIC),
        ),
        Line::styled(now.format("%A, %B %d, %Y").to_string(), t.main_style()),
        Line::raw(""),
        Line::styled("     CALENDAR     ", t.main_style()),
        Line::styled("Mo Tu We Th Fr Sa Su", t.dim_style()),
    ];

    for week in month_grid(today) {
        let current = week.contains(&Some(today.day()));
        let style = if current { t.main_style() } else { t.dim_style() };
        lines.push(Line::styled(week_text(&week, today.day()), style));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("UPCOMING:", t.main_style()));
    for (when, what) in UPCOMING {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", when), t.dim_style()),
            Span::styled(what, t.main_style()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(panel(t, None)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_starts_on_monday() {
        // 1 Oct 2026 is a Thursday
        let grid = month_grid(date(2026, 10, 14));
        assert_eq!(grid[0], [None, None, None, Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[4][5], Some(31));
        assert_eq!(grid[4][6], None);
    }

    #[test]
    fn grid_handles_leap_february() {
        let grid = month_grid(date(2024, 2, 10));
        let days: Vec<u32> = grid.iter().flatten().flatten().copied().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.last(), Some(&29));
    }

    #[test]
    fn grid_handles_december() {
        let grid = month_grid(date(2025, 12, 31));
        // 1 Dec 2025 is a Monday
        assert_eq!(grid[0][0], Some(1));
        assert_eq!(grid.iter().flatten().flatten().count(), 31);
    }

    #[test]
    fn today_is_starred() {
        let week = [None, None, None, Some(1), Some(2), Some(3), Some(4)];
        assert_eq!(week_text(&week, 2), "          1  2* 3  4 ");
    }
}
