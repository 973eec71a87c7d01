//! Current conditions from weatherapi.com.
//!
//! Fetching happens on a background task so a slow API never stalls the
//! render loop. Results come back as [`WeatherUpdate`] values tagged with
//! the location they were requested for.
//!
//! Graceful fallback: without an API key the panel shows sample data, and
//! any request failure becomes [`WeatherPanel::Unavailable`].

use std::time::Duration;

use chrono::Local;
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::constants::{PLACEHOLDER_API_KEY, WEATHER_API_URL, WEATHER_HTTP_TIMEOUT_SECS};
use crate::error::DashboardError;
use crate::models::{WeatherPanel, WeatherReport};

/// One finished fetch.
#[derive(Debug, Clone)]
pub struct WeatherUpdate {
    /// The location string the fetch was issued for.
    pub requested: String,
    pub panel: WeatherPanel,
}

/// Normalize a configured key: empty or the shipped placeholder is no key.
pub fn usable_api_key(key: Option<&str>) -> Option<String> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
        .map(str::to_string)
}

pub struct WeatherClient {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(WEATHER_HTTP_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current conditions for `location`. Never fails: errors end up
    /// in the returned panel.
    pub async fn fetch(&self, location: &str) -> WeatherPanel {
        let Some(key) = &self.api_key else {
            return WeatherPanel::Sample(WeatherReport::sample(location));
        };
        match self.fetch_live(key, location).await {
            Ok(report) => {
                tracing::info!(location, temp_c = report.temp_c, "weather updated");
                WeatherPanel::Live(report)
            }
            Err(e) => {
                tracing::warn!(location, "weather fetch failed: {}", e);
                WeatherPanel::Unavailable {
                    location: location.to_string(),
                    error: e.to_string(),
                    updated: Local::now(),
                }
            }
        }
    }

    async fn fetch_live(&self, key: &str, location: &str) -> Result<WeatherReport, DashboardError> {
        let resp = self
            .client
            .get(WEATHER_API_URL)
            .query(&[("key", key), ("q", location)])
            .send()
            .await
            .map_err(|e| DashboardError::ExternalService(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DashboardError::ExternalService(e.to_string()))?;
        if !status.is_success() {
            return Err(DashboardError::ExternalService(api_error_message(
                status.as_u16(),
                &body,
            )));
        }
        parse_current(&body)
    }
}

// ── API JSON structures ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    location: ApiLocation,
    current: ApiCurrent,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    temp_c: f64,
    condition: ApiCondition,
    humidity: u32,
    wind_kph: f64,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Decode a `current.json` success body.
pub fn parse_current(body: &str) -> Result<WeatherReport, DashboardError> {
    let resp: CurrentResponse = serde_json::from_str(body)
        .map_err(|e| DashboardError::ExternalService(format!("Malformed weather response: {}", e)))?;
    Ok(WeatherReport {
        location: resp.location.name,
        temp_c: resp.current.temp_c,
        condition: resp.current.condition.text,
        humidity: resp.current.humidity,
        wind_kph: resp.current.wind_kph,
        updated: Local::now(),
    })
}

/// The API's own error message when the body carries one, else the status.
pub fn api_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status))
}

// ── Background worker ────────────────────────────────────────────

/// Handles returned by [`spawn_worker`].
pub struct WeatherWorker {
    /// Send a location to fetch it now (and keep refetching it).
    pub requests: mpsc::UnboundedSender<String>,
    pub updates: mpsc::UnboundedReceiver<WeatherUpdate>,
}

/// Start the poller. It fetches `location` immediately, then every `every`,
/// and whenever a location arrives on the request channel.
///
/// The task exits when either channel is closed.
pub fn spawn_worker(client: WeatherClient, location: String, every: Duration) -> WeatherWorker {
    let (req_tx, mut req_rx) = mpsc::unbounded_channel::<String>();
    let (tx, rx) = mpsc::unbounded_channel::<WeatherUpdate>();

    tokio::spawn(async move {
        let mut location = location;
        let mut ticker = tokio::time::interval(every);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                req = req_rx.recv() => match req {
                    Some(next) => {
                        location = next;
                        ticker.reset();
                    }
                    None => break,
                },
            }
            let panel = client.fetch(&location).await;
            let update = WeatherUpdate {
                requested: location.clone(),
                panel,
            };
            if tx.send(update).is_err() {
                break;
            }
        }
        tracing::debug!("weather worker stopped");
    });

    WeatherWorker {
        requests: req_tx,
        updates: rx,
    }
}
