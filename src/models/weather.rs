use chrono::{DateTime, Local};

/// Current conditions for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location: String,
    pub temp_c: f64,
    pub condition: String,
    pub humidity: u32,
    pub wind_kph: f64,
    pub updated: DateTime<Local>,
}

impl WeatherReport {
    /// Placeholder conditions shown when no API key is configured.
    pub fn sample(location: &str) -> Self {
        Self {
            location: location.to_string(),
            temp_c: 22.0,
            condition: "Partly Cloudy".to_string(),
            humidity: 65,
            wind_kph: 8.0,
            updated: Local::now(),
        }
    }
}

/// What the weather panel currently has to show.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherPanel {
    /// No fetch has completed yet.
    Loading { location: String },
    /// No API key: static sample conditions.
    Sample(WeatherReport),
    Live(WeatherReport),
    Unavailable {
        location: String,
        error: String,
        updated: DateTime<Local>,
    },
}

impl WeatherPanel {
    pub fn location(&self) -> &str {
        match self {
            WeatherPanel::Loading { location } | WeatherPanel::Unavailable { location, .. } => {
                location
            }
            WeatherPanel::Sample(r) | WeatherPanel::Live(r) => &r.location,
        }
    }
}

/// Static forecast rows (the API call only covers current conditions).
pub const SAMPLE_FORECAST: &[(&str, &str)] = &[
    ("06:00", "18°C"),
    ("12:00", "22°C"),
    ("18:00", "20°C"),
    ("00:00", "16°C"),
];
