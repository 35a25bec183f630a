/*!
 * Scheduler Statistics
 * Counters and the final accounting report
 */

use super::Scheduler;
use crate::core::Tick;
use crate::monitoring::events::CpuUsage;
use serde::{Deserialize, Serialize};

/// Running counters for one simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub clock: Tick,
    pub idle_ticks: Tick,
    pub busy_ticks: Tick,
    pub dispatches: u64,
    pub arrivals: u64,
    pub wakeups: u64,
    pub io_blocks: u64,
    pub preemptions: u64,
    pub demotions: u64,
    pub promotions: u64,
    pub finished: u64,
}

/// Final accounting, mirrors the shutdown event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub final_clock: Tick,
    pub idle_ticks: Tick,
    pub cpu_usage: Vec<CpuUsage>,
    pub stats: SchedulerStats,
}

impl SimulationReport {
    /// Sum of CPU time over every process
    pub fn total_cpu_time(&self) -> Tick {
        self.cpu_usage.iter().map(|usage| usage.cpu_time).sum()
    }

    /// CPU time of one process
    pub fn cpu_time(&self, pid: crate::core::Pid) -> Option<Tick> {
        self.cpu_usage
            .iter()
            .find(|usage| usage.pid == pid)
            .map(|usage| usage.cpu_time)
    }
}

impl Scheduler {
    /// Snapshot of the counters
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            clock: self.clock,
            ..self.stats
        }
    }

    /// Accounting as of the current clock, processes in registration order
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            final_clock: self.clock,
            idle_ticks: self.stats.idle_ticks,
            cpu_usage: self
                .registry
                .iter()
                .map(|process| CpuUsage {
                    pid: process.pid,
                    cpu_time: process.cpu_time,
                })
                .collect(),
            stats: self.stats(),
        }
    }
}
