//! Bounded system-metrics history and network throughput.
//!
//! The history is five parallel streams (same length, same index = same
//! sampling instant), each capped at [`HISTORY_CAPACITY`] with the oldest
//! entries dropped first.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::constants::{HISTORY_CAPACITY, HISTORY_SAMPLE_SECS};
use crate::error::DashboardError;
use crate::models::SystemSnapshot;
use crate::tasks::write_atomic;

/// One sampling instant across all streams.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySample {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub network_in_bytes: u64,
    pub network_out_bytes: u64,
    pub timestamp: String,
}

impl HistorySample {
    pub fn from_snapshot(snapshot: &SystemSnapshot, timestamp: String) -> Self {
        Self {
            cpu_percent: snapshot.cpu_percent,
            memory_percent: snapshot.memory_percent,
            network_in_bytes: snapshot.total_rx,
            network_out_bytes: snapshot.total_tx,
            timestamp,
        }
    }
}

/// On-disk shape of the history file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemHistory {
    pub cpu: Vec<f32>,
    pub memory: Vec<f32>,
    pub timestamps: Vec<String>,
    pub network_in: Vec<u64>,
    pub network_out: Vec<u64>,
}

impl SystemHistory {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    fn push(&mut self, s: &HistorySample) {
        self.cpu.push(s.cpu_percent);
        self.memory.push(s.memory_percent);
        self.timestamps.push(s.timestamp.clone());
        self.network_in.push(s.network_in_bytes);
        self.network_out.push(s.network_out_bytes);
    }

    /// Keep only the newest `max` entries of every stream.
    fn truncate_to(&mut self, max: usize) {
        keep_last(&mut self.cpu, max);
        keep_last(&mut self.memory, max);
        keep_last(&mut self.timestamps, max);
        keep_last(&mut self.network_in, max);
        keep_last(&mut self.network_out, max);
    }

    /// Restore the equal-length invariant on data read from disk.
    fn normalize(&mut self) {
        let shortest = [
            self.cpu.len(),
            self.memory.len(),
            self.timestamps.len(),
            self.network_in.len(),
            self.network_out.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or(0);
        self.truncate_to(shortest.min(HISTORY_CAPACITY));
    }
}

fn keep_last<T>(v: &mut Vec<T>, max: usize) {
    if v.len() > max {
        v.drain(..v.len() - max);
    }
}

pub struct HistoryRecorder {
    history: SystemHistory,
    last_sample: Option<Instant>,
    min_interval: Duration,
    path: Option<PathBuf>,
}

impl HistoryRecorder {
    pub fn in_memory() -> Self {
        Self {
            history: SystemHistory::default(),
            last_sample: None,
            min_interval: Duration::from_secs_f64(HISTORY_SAMPLE_SECS),
            path: None,
        }
    }

    /// Load from `path`; a missing or corrupt file starts a fresh history.
    pub fn load(path: &Path) -> Self {
        let history = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<SystemHistory>(&content) {
                Ok(mut h) => {
                    h.normalize();
                    h
                }
                Err(e) => {
                    tracing::warn!("discarding corrupt history {}: {}", path.display(), e);
                    SystemHistory::default()
                }
            },
            Err(_) => SystemHistory::default(),
        };
        Self {
            history,
            path: Some(path.to_path_buf()),
            ..Self::in_memory()
        }
    }

    #[cfg(test)]
    pub fn history(&self) -> &SystemHistory {
        &self.history
    }

    /// Record `sample` if at least the sampling interval has passed since
    /// the last accepted one.
    ///
    /// Returns `None` when throttled. `Some(Err)` means the sample was kept
    /// in memory but could not be written.
    pub fn maybe_sample(
        &mut self,
        now: Instant,
        sample: &HistorySample,
    ) -> Option<Result<(), DashboardError>> {
        if let Some(last) = self.last_sample {
            if now.saturating_duration_since(last) < self.min_interval {
                return None;
            }
        }
        self.last_sample = Some(now);
        self.history.push(sample);
        self.history.truncate_to(HISTORY_CAPACITY);
        Some(self.save())
    }

    pub fn save(&self) -> Result<(), DashboardError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = serde_json::to_string(&self.history).map_err(|source| {
            DashboardError::Parse {
                what: "system history",
                source,
            }
        })?;
        write_atomic(path, data.as_bytes()).map_err(|e| DashboardError::io("saving", path, e))
    }
}

/// Bytes/sec between two cumulative counter readings.
///
/// `None` when no time has elapsed. A counter that went backwards counts
/// as no traffic.
pub fn rate(counter_now: u64, counter_prev: u64, elapsed_secs: f64) -> Option<f64> {
    if elapsed_secs <= 0.0 {
        return None;
    }
    Some(counter_now.saturating_sub(counter_prev) as f64 / elapsed_secs)
}

/// Receive/transmit throughput derived from successive snapshots.
#[derive(Debug, Default)]
pub struct NetThroughput {
    prev: Option<(u64, u64, Instant)>,
    pub rx_per_sec: f64,
    pub tx_per_sec: f64,
}

impl NetThroughput {
    pub fn update(&mut self, total_rx: u64, total_tx: u64, now: Instant) {
        if let Some((prev_rx, prev_tx, prev_at)) = self.prev {
            let elapsed = now.saturating_duration_since(prev_at).as_secs_f64();
            match (rate(total_rx, prev_rx, elapsed), rate(total_tx, prev_tx, elapsed)) {
                (Some(rx), Some(tx)) => {
                    self.rx_per_sec = rx;
                    self.tx_per_sec = tx;
                }
                // Same instant: keep the previous rates and baseline.
                _ => return,
            }
        }
        self.prev = Some((total_rx, total_tx, now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: u64) -> HistorySample {
        HistorySample {
            cpu_percent: n as f32,
            memory_percent: 50.0,
            network_in_bytes: n * 100,
            network_out_bytes: n * 10,
            timestamp: format!("00:00:{:02}", n % 60),
        }
    }

    fn assert_streams_equal_len(h: &SystemHistory, expected: usize) {
        assert_eq!(h.cpu.len(), expected);
        assert_eq!(h.memory.len(), expected);
        assert_eq!(h.timestamps.len(), expected);
        assert_eq!(h.network_in.len(), expected);
        assert_eq!(h.network_out.len(), expected);
    }

    // ── Throttling ────────────────────────────────────────────────

    #[test]
    fn first_sample_is_accepted() {
        let mut rec = HistoryRecorder::in_memory();
        assert!(rec.maybe_sample(Instant::now(), &sample(1)).is_some());
        assert_streams_equal_len(rec.history(), 1);
    }

    #[test]
    fn samples_inside_interval_are_dropped() {
        let mut rec = HistoryRecorder::in_memory();
        let t0 = Instant::now();
        rec.maybe_sample(t0, &sample(1));
        assert!(rec
            .maybe_sample(t0 + Duration::from_millis(4999), &sample(2))
            .is_none());
        assert!(rec.maybe_sample(t0 + Duration::from_secs(5), &sample(3)).is_some());
        assert_eq!(rec.history().cpu, vec![1.0, 3.0]);
    }

    // ── Bounds ────────────────────────────────────────────────────

    #[test]
    fn streams_capped_at_capacity_fifo() {
        let mut rec = HistoryRecorder::in_memory();
        let t0 = Instant::now();
        for n in 0..150u64 {
            rec.maybe_sample(t0 + Duration::from_secs(n * 5), &sample(n));
            let len = rec.history().len();
            assert!(len <= HISTORY_CAPACITY);
            assert_streams_equal_len(rec.history(), len);
        }
        let h = rec.history();
        assert_eq!(h.len(), HISTORY_CAPACITY);
        assert_eq!(h.cpu.first(), Some(&90.0));
        assert_eq!(h.cpu.last(), Some(&149.0));
        assert_eq!(h.network_in.first(), Some(&9000));
    }

    // ── Persistence ───────────────────────────────────────────────

    #[test]
    fn sample_is_persisted_and_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_history.json");
        let mut rec = HistoryRecorder::load(&path);
        assert!(rec.history().is_empty());
        rec.maybe_sample(Instant::now(), &sample(7)).unwrap().unwrap();

        let reloaded = HistoryRecorder::load(&path);
        assert_eq!(reloaded.history(), rec.history());
    }

    #[test]
    fn corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_history.json");
        fs::write(&path, "not json at all").unwrap();
        let rec = HistoryRecorder::load(&path);
        assert_streams_equal_len(rec.history(), 0);
    }

    #[test]
    fn uneven_file_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_history.json");
        fs::write(
            &path,
            r#"{"cpu":[1,2,3],"memory":[4,5],"timestamps":["a","b","c"],"network_in":[1,2,3],"network_out":[1,2,3]}"#,
        )
        .unwrap();
        let rec = HistoryRecorder::load(&path);
        assert_streams_equal_len(rec.history(), 2);
        assert_eq!(rec.history().cpu, vec![2.0, 3.0]);
        assert_eq!(rec.history().timestamps, vec!["b", "c"]);
    }

    // ── Throughput ────────────────────────────────────────────────

    #[test]
    fn rate_divides_by_elapsed() {
        assert_eq!(rate(3000, 1000, 2.0), Some(1000.0));
        assert_eq!(rate(1000, 1000, 1.0), Some(0.0));
    }

    #[test]
    fn rate_skips_zero_elapsed() {
        assert_eq!(rate(3000, 1000, 0.0), None);
        assert_eq!(rate(3000, 1000, -1.0), None);
    }

    #[test]
    fn rate_counter_reset_is_zero() {
        assert_eq!(rate(10, 5000, 1.0), Some(0.0));
    }

    #[test]
    fn throughput_keeps_previous_rate_on_same_instant() {
        let mut net = NetThroughput::default();
        let t0 = Instant::now();
        net.update(0, 0, t0);
        net.update(2048, 1024, t0 + Duration::from_secs(2));
        assert_eq!(net.rx_per_sec, 1024.0);
        assert_eq!(net.tx_per_sec, 512.0);

        net.update(999_999, 999_999, t0 + Duration::from_secs(2));
        assert_eq!(net.rx_per_sec, 1024.0);
        assert_eq!(net.tx_per_sec, 512.0);
    }
}
