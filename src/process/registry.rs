/*!
 * Process Registry
 * Owns every process record; lookups are by pid, iteration is by insertion order
 */

use super::types::{Phase, Process};
use crate::config::SchedulerConfig;
use crate::core::{Pid, SchedulerError, SchedulerResult, Tick};
use crate::workload::WorkloadRecord;
use ahash::AHashMap;
use log::debug;

/// Canonical process table
///
/// Records are stored in a `Vec` so iteration order is registration order,
/// which is the tie-break for simultaneous arrivals and wake-ups. The pid
/// index gives O(1) lookup without assuming pids are dense or bounded.
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
    index: AHashMap<Pid, usize>,
    max_processes: usize,
    max_phases: usize,
}

impl ProcessRegistry {
    pub fn new(max_processes: usize, max_phases: usize) -> Self {
        Self {
            processes: Vec::new(),
            index: AHashMap::new(),
            max_processes,
            max_phases,
        }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.max_processes, config.max_phases)
    }

    /// Merge one workload record
    ///
    /// A new pid creates a process; a known pid gets the phase appended and
    /// its arrival time raised to the later of the two.
    pub fn add_record(&mut self, record: &WorkloadRecord) -> SchedulerResult<Pid> {
        let phase = Phase::from_raw(
            record.pid,
            record.run_ticks,
            record.io_ticks,
            record.repeat_count,
        )?;
        self.merge(record.pid, record.arrival_time, phase)?;
        Ok(record.pid)
    }

    /// Append a phase to `pid`, creating the process if needed
    pub fn merge(&mut self, pid: Pid, arrival_time: Tick, phase: Phase) -> SchedulerResult<()> {
        match self.index.get(&pid) {
            Some(&slot) => {
                let process = &mut self.processes[slot];
                if process.phases.len() >= self.max_phases {
                    return Err(SchedulerError::capacity(
                        format!("phases of process {}", pid),
                        self.max_phases,
                    ));
                }
                process.arrival_time = process.arrival_time.max(arrival_time);
                process.phases.push(phase);
                debug!(
                    "Process {} gained phase {} (arrival {})",
                    pid,
                    process.phases.len(),
                    process.arrival_time
                );
                Ok(())
            }
            None => self.insert(Process::new(pid, arrival_time).with_phase(phase)),
        }
    }

    /// Register a fully built process
    pub fn insert(&mut self, process: Process) -> SchedulerResult<()> {
        if self.index.contains_key(&process.pid) {
            return Err(SchedulerError::DuplicateProcess(process.pid));
        }
        if process.phases.is_empty() {
            return Err(SchedulerError::EmptyProcess(process.pid));
        }
        if self.processes.len() >= self.max_processes {
            return Err(SchedulerError::capacity("processes", self.max_processes));
        }
        if process.phases.len() > self.max_phases {
            return Err(SchedulerError::capacity(
                format!("phases of process {}", process.pid),
                self.max_phases,
            ));
        }

        debug!(
            "Registered process {} (arrival {}, {} phases)",
            process.pid,
            process.arrival_time,
            process.phases.len()
        );
        self.index.insert(process.pid, self.processes.len());
        self.processes.push(process);
        Ok(())
    }

    #[inline]
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.index.get(&pid).map(|&slot| &self.processes[slot])
    }

    /// Lookup that fails with `ProcessNotFound`
    pub fn lookup(&self, pid: Pid) -> SchedulerResult<&Process> {
        self.get(pid).ok_or(SchedulerError::ProcessNotFound(pid))
    }

    pub(crate) fn lookup_mut(&mut self, pid: Pid) -> SchedulerResult<&mut Process> {
        match self.index.get(&pid) {
            Some(&slot) => Ok(&mut self.processes[slot]),
            None => Err(SchedulerError::ProcessNotFound(pid)),
        }
    }

    /// Processes in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Process> {
        self.processes.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// True once every process has finished (vacuously true when empty)
    pub fn all_finished(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::from_config(&SchedulerConfig::default())
    }
}
