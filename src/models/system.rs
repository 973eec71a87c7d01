/// System-wide resource snapshot.
/// Provides the big-picture view of machine health.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    pub hostname: String,
    pub os_name: String,
    pub uptime_secs: u64,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    /// Usage of the root filesystem (or all disks when `/` is not listed).
    pub disk_percent: f32,
    /// Bytes received since boot, all interfaces.
    pub total_rx: u64,
    /// Bytes transmitted since boot, all interfaces.
    pub total_tx: u64,
    /// Busiest processes, CPU normalized by logical core count.
    pub top_processes: Vec<ProcessSample>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub name: String,
    pub cpu_percent: f32,
}

/// Format an uptime as `1 day, 3:04:05`, the way the header shows it.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    match days {
        0 => format!("{}:{:02}:{:02}", hours, minutes, seconds),
        1 => format!("1 day, {}:{:02}:{:02}", hours, minutes, seconds),
        d => format!("{} days, {}:{:02}:{:02}", d, hours, minutes, seconds),
    }
}

/// Percentage of `used` over `total`, 0 when `total` is 0.
pub fn percent_of(used: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (used as f64 / total as f64 * 100.0) as f32
}
