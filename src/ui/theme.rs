use std::fmt;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use crate::error::DashboardError;
use crate::models::{Priority, Severity};

/// The built-in palettes selectable with `theme <name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Amber,
    Green,
    Blue,
}

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Amber, ThemeName::Green, ThemeName::Blue];

    /// "amber, green, blue", as listed in error messages.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Amber => write!(f, "amber"),
            ThemeName::Green => write!(f, "green"),
            ThemeName::Blue => write!(f, "blue"),
        }
    }
}

impl FromStr for ThemeName {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "amber" => Ok(ThemeName::Amber),
            "green" => Ok(ThemeName::Green),
            "blue" => Ok(ThemeName::Blue),
            other => Err(DashboardError::validation(format!(
                "Unknown theme: {}. Available: {}",
                other,
                Self::available()
            ))),
        }
    }
}

/// Data-driven theme: every color in one struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: ThemeName,

    // ── Phosphor tones ───────────────────────────────────────
    pub main: Color,
    pub dim: Color,
    pub bright: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub error: Color,
    pub success: Color,
    pub bg: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Amber-on-black, the classic terminal look.
    pub fn amber() -> Self {
        Self {
            name: ThemeName::Amber,
            main: Color::Rgb(0xFF, 0xBF, 0x00),
            dim: Color::Rgb(0xCC, 0x99, 0x00),
            bright: Color::Rgb(0xFF, 0xDF, 0x00),
            ..Self::base()
        }
    }

    pub fn green() -> Self {
        Self {
            name: ThemeName::Green,
            main: Color::Rgb(0x00, 0xFF, 0x00),
            dim: Color::Rgb(0x00, 0x99, 0x00),
            bright: Color::Rgb(0xCC, 0xFF, 0xCC),
            ..Self::base()
        }
    }

    pub fn blue() -> Self {
        Self {
            name: ThemeName::Blue,
            main: Color::Rgb(0x00, 0xBF, 0xFF),
            dim: Color::Rgb(0x00, 0x99, 0xCC),
            bright: Color::Rgb(0x99, 0xCC, 0xFF),
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            name: ThemeName::Amber,
            main: Color::Reset,
            dim: Color::Reset,
            bright: Color::Reset,
            error: Color::Rgb(0xFF, 0x55, 0x55),
            success: Color::Rgb(0x55, 0xFF, 0x55),
            bg: Color::Black,
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Amber => Self::amber(),
            ThemeName::Green => Self::green(),
            ThemeName::Blue => Self::blue(),
        }
    }

    // ── Style helpers ────────────────────────────────────────

    pub fn main_style(&self) -> Style {
        Style::default().fg(self.main)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn bright_style(&self) -> Style {
        Style::default().fg(self.bright)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.bright).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.main)
    }

    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Info => self.main_style(),
            Severity::Error => Style::default().fg(self.error),
            Severity::Success => Style::default().fg(self.success),
        }
    }

    pub fn priority_style(&self, priority: Priority) -> Style {
        match priority {
            Priority::High => self.bright_style(),
            Priority::Medium => self.main_style(),
            Priority::Low => self.dim_style(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::amber()
    }
}
