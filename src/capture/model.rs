use chrono::NaiveTime;
use serde::Serialize;

/// System-wide figures from the header block of one snapshot.
///
/// Every field starts at zero and is filled in as its source line is matched.
/// A field that never matched stays zero; that is a valid final state.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Metadata {
    pub threads_total: u32,
    pub threads_running: u32,
    pub threads_sleeping: u32,
    pub threads_stopped: u32,
    pub threads_zombie: u32,
    pub cpu_user: f64,
    pub cpu_system: f64,
    pub cpu_idle: f64,
    pub cpu_wait: f64,
    pub cpu_steal: f64,
    /// Memory figures keep the unit of the capture (MiB for stock `top`).
    pub mem_total: f64,
    pub mem_free: f64,
    pub mem_used: f64,
    pub mem_buff_cache: f64,
    pub swap_total: f64,
    pub swap_free: f64,
    pub swap_used: f64,
    pub load_avg_1: f64,
    pub load_avg_5: f64,
    pub load_avg_15: f64,
    pub uptime: String,
    pub users: u32,
}

/// One row of the process table.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessRecord {
    pub pid: i64,
    pub user: String,
    pub priority: i32,
    pub nice: i32,
    /// Display strings, suffixes such as `g` or `m` are kept verbatim.
    pub virt: String,
    pub res: String,
    pub shr: String,
    pub state: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub time: String,
    pub command: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Snapshot {
    /// Time of day from the boundary line. Captures carry no date.
    pub time: NaiveTime,
    pub metadata: Metadata,
    pub processes: Vec<ProcessRecord>,
}

impl Snapshot {
    pub fn new(time: NaiveTime) -> Self {
        Self {
            time,
            metadata: Metadata::default(),
            processes: Vec::new(),
        }
    }
}

/// Snapshots in the order their boundary lines appeared in the capture.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParseResult {
    pub snapshots: Vec<Snapshot>,
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn process_count(&self) -> usize {
        self.snapshots.iter().map(|s| s.processes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snapshot_is_zero_valued() {
        let snap = Snapshot::new(NaiveTime::default());
        assert_eq!(snap.metadata, Metadata::default());
        assert!(snap.processes.is_empty());
        assert_eq!(snap.time.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn process_count_sums_all_snapshots() {
        let mut a = Snapshot::default();
        a.processes.push(ProcessRecord::default());
        let mut b = Snapshot::default();
        b.processes.push(ProcessRecord::default());
        b.processes.push(ProcessRecord::default());
        let result = ParseResult {
            snapshots: vec![a, b],
        };
        assert_eq!(result.process_count(), 3);
        assert!(!result.is_empty());
    }
}
