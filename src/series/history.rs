use std::collections::HashMap;

use serde::Serialize;

/// Dense per-process series, one value per snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSeries {
    pub pid: i64,
    /// Command seen the first time this PID appeared.
    pub command: String,
    /// `<command>-<pid>`.
    pub label: String,
    pub cpu: Vec<f64>,
    pub mem: Vec<f64>,
}

impl ProcessSeries {
    fn new(pid: i64, command: &str, width: usize) -> Self {
        Self {
            pid,
            command: command.to_string(),
            label: format!("{command}-{pid}"),
            cpu: vec![0.0; width],
            mem: vec![0.0; width],
        }
    }

    pub fn peak_cpu(&self) -> f64 {
        self.cpu.iter().copied().fold(0.0, f64::max)
    }
}

/// Builds [`ProcessSeries`] one snapshot at a time, keyed by PID.
///
/// A PID seen for the first time at snapshot `i` starts with `i` zeros. PIDs
/// missing from a snapshot get a zero when the snapshot is closed.
#[derive(Debug, Default)]
pub(crate) struct HistoryStore {
    index: HashMap<i64, usize>,
    series: Vec<ProcessSeries>,
    closed: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation for the open snapshot. A second observation of
    /// the same PID in the same snapshot is ignored.
    pub fn record(&mut self, pid: i64, command: &str, cpu: f64, mem: f64) {
        let closed = self.closed;
        let slot = *self.index.entry(pid).or_insert_with(|| {
            self.series.push(ProcessSeries::new(pid, command, closed));
            self.series.len() - 1
        });
        let entry = &mut self.series[slot];
        if entry.cpu.len() == closed {
            entry.cpu.push(cpu);
            entry.mem.push(mem);
        }
    }

    /// Zero-fill every PID that was not observed and move to the next snapshot.
    pub fn close_snapshot(&mut self) {
        self.closed += 1;
        for entry in &mut self.series {
            entry.cpu.resize(self.closed, 0.0);
            entry.mem.resize(self.closed, 0.0);
        }
    }

    #[cfg(test)]
    pub fn get(&self, pid: i64) -> Option<&ProcessSeries> {
        self.index.get(&pid).map(|&slot| &self.series[slot])
    }

    /// Series in order of first appearance.
    pub fn into_series(self) -> Vec<ProcessSeries> {
        self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_process_is_front_filled() {
        let mut store = HistoryStore::new();
        store.record(1, "init", 1.0, 0.1);
        store.close_snapshot();
        store.record(1, "init", 2.0, 0.1);
        store.record(7, "worker", 50.0, 3.0);
        store.close_snapshot();

        let h = store.get(7).unwrap();
        assert_eq!(h.cpu, vec![0.0, 50.0]);
        assert_eq!(h.mem, vec![0.0, 3.0]);
        assert_eq!(h.label, "worker-7");
    }

    #[test]
    fn missing_process_reads_zero() {
        let mut store = HistoryStore::new();
        store.record(3, "a", 10.0, 1.0);
        store.close_snapshot();
        store.close_snapshot();
        store.record(3, "a", 30.0, 1.0);
        store.close_snapshot();
        assert_eq!(store.get(3).unwrap().cpu, vec![10.0, 0.0, 30.0]);
    }

    #[test]
    fn duplicate_pid_in_one_snapshot_keeps_first() {
        let mut store = HistoryStore::new();
        store.record(5, "a", 10.0, 1.0);
        store.record(5, "a", 99.0, 9.0);
        store.close_snapshot();
        assert_eq!(store.get(5).unwrap().cpu, vec![10.0]);
    }

    #[test]
    fn label_uses_first_command() {
        let mut store = HistoryStore::new();
        store.record(9, "bash", 1.0, 0.0);
        store.close_snapshot();
        store.record(9, "python3", 2.0, 0.0);
        store.close_snapshot();

        let series = store.into_series();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "bash-9");
        assert_eq!(series[0].cpu, vec![1.0, 2.0]);
    }

    #[test]
    fn peak_cpu() {
        let mut store = HistoryStore::new();
        for cpu in [3.0, 42.5, 7.0] {
            store.record(1, "x", cpu, 0.0);
            store.close_snapshot();
        }
        assert_eq!(store.get(1).unwrap().peak_cpu(), 42.5);
    }
}
