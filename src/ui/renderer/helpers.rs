//! Shared rendering helpers: text bars, rates, column-accurate truncation.

use ratatui::{
    text::Span,
    widgets::{Block, Borders},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::theme::Theme;

/// A bordered panel in the theme's border color, optionally titled.
pub fn panel<'a>(t: &Theme, title: Option<&'a str>) -> Block<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style())
        .style(t.main_style().bg(t.bg));
    match title {
        Some(title) => block.title(Span::styled(format!(" {} ", title), t.title_style())),
        None => block,
    }
}

/// Text usage bar like `[████░░░░]`, `width` cells between the brackets.
pub fn create_bar(percent: f32, width: usize) -> String {
    let filled = ((width as f32 * percent / 100.0) as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bytes/sec as `12.3 KB/s`.
pub fn format_kbps(bytes_per_sec: f64) -> String {
    format!("{:.1} KB/s", bytes_per_sec / 1024.0)
}

/// Cut `s` so it occupies at most `max_cols` terminal columns.
pub fn truncate_to_width(s: &str, max_cols: usize) -> String {
    let mut out = String::new();
    let mut cols = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if cols + w > max_cols {
            break;
        }
        cols += w;
        out.push(c);
    }
    out
}

/// Truncate or right-pad `s` to exactly `cols` terminal columns.
pub fn fit_to_width(s: &str, cols: usize) -> String {
    let mut out = truncate_to_width(s, cols);
    let used = out.width();
    out.extend(std::iter::repeat(' ').take(cols.saturating_sub(used)));
    out
}
