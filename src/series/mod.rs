//! Reshaping parsed snapshots into dense, index-aligned series.
//!
//! Every array in a [`SeriesSet`] has one entry per snapshot, in snapshot
//! order, so any of them can be plotted against [`SeriesSet::times`] without
//! reindexing. Processes missing from a snapshot read as zero there.

mod history;

use serde::Serialize;

use crate::capture::{Metadata, ParseResult};
use history::HistoryStore;

pub use history::ProcessSeries;

/// Format of the shared x-axis labels.
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CpuSeries {
    pub user: Vec<f64>,
    pub system: Vec<f64>,
    pub idle: Vec<f64>,
    pub wait: Vec<f64>,
    pub steal: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemorySeries {
    pub total: Vec<f64>,
    pub free: Vec<f64>,
    pub used: Vec<f64>,
    pub buff_cache: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwapSeries {
    pub total: Vec<f64>,
    pub free: Vec<f64>,
    pub used: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreadSeries {
    pub total: Vec<u32>,
    pub running: Vec<u32>,
    pub sleeping: Vec<u32>,
    pub stopped: Vec<u32>,
    pub zombie: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadSeries {
    pub one: Vec<f64>,
    pub five: Vec<f64>,
    pub fifteen: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRow {
    pub time: String,
    pub process_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesSet {
    pub times: Vec<String>,
    pub cpu: CpuSeries,
    pub memory: MemorySeries,
    pub swap: SwapSeries,
    pub threads: ThreadSeries,
    pub load: LoadSeries,
    /// One entry per distinct PID, in order of first appearance.
    pub processes: Vec<ProcessSeries>,
    pub snapshots: Vec<SnapshotRow>,
}

impl SeriesSet {
    fn with_capacity(n: usize) -> Self {
        let f = || Vec::with_capacity(n);
        let u = || Vec::with_capacity(n);
        Self {
            times: Vec::with_capacity(n),
            cpu: CpuSeries {
                user: f(),
                system: f(),
                idle: f(),
                wait: f(),
                steal: f(),
            },
            memory: MemorySeries {
                total: f(),
                free: f(),
                used: f(),
                buff_cache: f(),
            },
            swap: SwapSeries {
                total: f(),
                free: f(),
                used: f(),
            },
            threads: ThreadSeries {
                total: u(),
                running: u(),
                sleeping: u(),
                stopped: u(),
                zombie: u(),
            },
            load: LoadSeries {
                one: f(),
                five: f(),
                fifteen: f(),
            },
            processes: Vec::new(),
            snapshots: Vec::with_capacity(n),
        }
    }

    /// Number of snapshots, the length of every series.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Look up a process series by its `<command>-<pid>` label.
    pub fn process(&self, label: &str) -> Option<&ProcessSeries> {
        self.processes.iter().find(|p| p.label == label)
    }

    pub fn process_by_pid(&self, pid: i64) -> Option<&ProcessSeries> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    fn push_metadata(&mut self, m: &Metadata) {
        self.cpu.user.push(m.cpu_user);
        self.cpu.system.push(m.cpu_system);
        self.cpu.idle.push(m.cpu_idle);
        self.cpu.wait.push(m.cpu_wait);
        self.cpu.steal.push(m.cpu_steal);

        self.memory.total.push(m.mem_total);
        self.memory.free.push(m.mem_free);
        self.memory.used.push(m.mem_used);
        self.memory.buff_cache.push(m.mem_buff_cache);

        self.swap.total.push(m.swap_total);
        self.swap.free.push(m.swap_free);
        self.swap.used.push(m.swap_used);

        self.threads.total.push(m.threads_total);
        self.threads.running.push(m.threads_running);
        self.threads.sleeping.push(m.threads_sleeping);
        self.threads.stopped.push(m.threads_stopped);
        self.threads.zombie.push(m.threads_zombie);

        self.load.one.push(m.load_avg_1);
        self.load.five.push(m.load_avg_5);
        self.load.fifteen.push(m.load_avg_15);
    }
}

/// Align every metric and every process onto the snapshot axis.
///
/// A PID is one series for the whole run even if its command changes, so a
/// reused PID is merged with its predecessor.
pub fn align(result: &ParseResult) -> SeriesSet {
    let mut set = SeriesSet::with_capacity(result.snapshots.len());
    let mut history = HistoryStore::new();

    for snapshot in &result.snapshots {
        let time = snapshot.time.format(TIME_FORMAT).to_string();
        set.snapshots.push(SnapshotRow {
            time: time.clone(),
            process_count: snapshot.processes.len(),
        });
        set.times.push(time);
        set.push_metadata(&snapshot.metadata);

        for process in &snapshot.processes {
            history.record(
                process.pid,
                &process.command,
                process.cpu_percent,
                process.mem_percent,
            );
        }
        history.close_snapshot();
    }

    set.processes = history.into_series();
    tracing::debug!(
        snapshots = set.len(),
        processes = set.processes.len(),
        "series aligned"
    );
    set
}
