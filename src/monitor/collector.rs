use std::path::Path;

use sysinfo::{Disks, Networks, ProcessesToUpdate, System};

use crate::constants::TOP_PROCESS_COUNT;
use crate::models::{percent_of, ProcessSample, SystemSnapshot};

/// Responsible for collecting system data for the system panel.
/// Single Responsibility: only gathers data, no analysis.
pub struct SystemCollector {
    sys: System,
    networks: Networks,
    disks: Disks,
}

impl SystemCollector {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys,
            networks: Networks::new_with_refreshed_list(),
            disks: Disks::new_with_refreshed_list(),
        }
    }

    /// Refresh everything the dashboard shows and return a fresh snapshot.
    ///
    /// CPU figures are deltas against the previous call, so the very first
    /// snapshot reads near zero.
    pub fn collect(&mut self) -> SystemSnapshot {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.sys.refresh_processes(ProcessesToUpdate::All, true);
        self.networks.refresh();
        self.disks.refresh();

        let cpu_count = self.sys.cpus().len();
        let (total_rx, total_tx) = self.networks.iter().fold((0u64, 0u64), |(rx, tx), (_, data)| {
            (
                rx.saturating_add(data.total_received()),
                tx.saturating_add(data.total_transmitted()),
            )
        });

        let processes = self
            .sys
            .processes()
            .values()
            .map(|p| ProcessSample {
                name: p.name().to_string_lossy().to_string(),
                cpu_percent: p.cpu_usage(),
            })
            .collect();

        SystemSnapshot {
            hostname: System::host_name().unwrap_or_else(|| "unknown".into()),
            os_name: format!(
                "{} {}",
                System::name().unwrap_or_else(|| "Unknown".into()),
                System::os_version().unwrap_or_default()
            )
            .trim()
            .to_string(),
            uptime_secs: System::uptime(),
            cpu_percent: self.sys.global_cpu_usage(),
            memory_percent: percent_of(self.sys.used_memory(), self.sys.total_memory()),
            disk_percent: self.disk_percent(),
            total_rx,
            total_tx,
            top_processes: top_processes(processes, cpu_count, TOP_PROCESS_COUNT),
        }
    }

    /// Usage of the root filesystem, or of all disks combined when no
    /// disk is mounted at `/`.
    fn disk_percent(&self) -> f32 {
        let list = self.disks.list();
        let usage = |total: u64, available: u64| percent_of(total.saturating_sub(available), total);
        if let Some(root) = list.iter().find(|d| d.mount_point() == Path::new("/")) {
            return usage(root.total_space(), root.available_space());
        }
        let (total, available) = list.iter().fold((0u64, 0u64), |(t, a), d| {
            (t + d.total_space(), a + d.available_space())
        });
        usage(total, available)
    }
}

impl Default for SystemCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// `user@host` for the header, from `$USER` (or `$USERNAME`).
pub fn terminal_id(hostname: &str) -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "user".into());
    format!("{}@{}", user, hostname)
}

/// The `n` busiest processes, CPU normalized by logical core count so a
/// single-threaded hog reads at most 100 / cores.
pub fn top_processes(mut samples: Vec<ProcessSample>, cpu_count: usize, n: usize) -> Vec<ProcessSample> {
    let cores = cpu_count.max(1) as f32;
    for s in &mut samples {
        s.cpu_percent /= cores;
    }
    samples.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    samples.truncate(n);
    samples
}
