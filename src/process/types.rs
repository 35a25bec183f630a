/*!
 * Process Types
 * Workload phases and per-process scheduling state
 */

use crate::core::{Pid, QueueLevel, SchedulerError, SchedulerResult, Tick};
use serde::{Deserialize, Serialize};

/// One CPU burst followed by an I/O wait, repeated `repeat_count` extra times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Phase {
    pub run_ticks: Tick,
    pub io_ticks: Tick,
    pub repeat_count: u64,
}

impl Phase {
    #[inline]
    #[must_use]
    pub const fn new(run_ticks: Tick, io_ticks: Tick, repeat_count: u64) -> Self {
        Self {
            run_ticks,
            io_ticks,
            repeat_count,
        }
    }

    /// Build from raw workload values, rejecting negatives
    pub fn from_raw(pid: Pid, run: i64, io: i64, repeat: i64) -> SchedulerResult<Self> {
        let field = |name: &str, value: i64| {
            u64::try_from(value).map_err(|_| SchedulerError::InvalidPhase {
                pid,
                reason: format!("{} must be non-negative, got {}", name, value),
            })
        };

        Ok(Self {
            run_ticks: field("run_ticks", run)?,
            io_ticks: field("io_ticks", io)?,
            repeat_count: field("repeat_count", repeat)?,
        })
    }
}

/// Scheduling state of a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProcessState {
    /// Registered but arrival not yet admitted
    Pending,
    /// Sitting in a level queue
    Ready,
    /// Dispatched and executing a burst
    Running,
    /// Waiting for simulated I/O to complete
    Blocked { wake_time: Tick },
    /// All phases done; never re-queued
    Finished,
}

/// Process record owned by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub phases: Vec<Phase>,
    pub current_phase: usize,
    pub current_repeat: u64,
    pub run_remaining: Tick,
    pub level: QueueLevel,
    pub exhaustion_count: u32,
    pub yield_count: u32,
    pub state: ProcessState,
    pub cpu_time: Tick,
    pub finish_time: Option<Tick>,
}

impl Process {
    #[inline]
    #[must_use]
    pub fn new(pid: Pid, arrival_time: Tick) -> Self {
        Self {
            pid,
            arrival_time,
            phases: Vec::new(),
            current_phase: 0,
            current_repeat: 0,
            run_remaining: 0,
            level: QueueLevel::HIGHEST,
            exhaustion_count: 0,
            yield_count: 0,
            state: ProcessState::Pending,
            cpu_time: 0,
            finish_time: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Phase the cursor points at, `None` once every phase is done
    #[inline]
    pub fn phase(&self) -> Option<&Phase> {
        self.phases.get(self.current_phase)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, ProcessState::Pending)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, ProcessState::Finished)
    }

    /// Wake tick if blocked on I/O
    #[inline]
    pub const fn wake_time(&self) -> Option<Tick> {
        match self.state {
            ProcessState::Blocked { wake_time } => Some(wake_time),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_raw_rejects_negative() {
        assert_eq!(Phase::from_raw(1, 5, 0, 2).unwrap(), Phase::new(5, 0, 2));

        let err = Phase::from_raw(7, 5, -1, 0).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidPhase { pid: 7, .. }));
    }

    #[test]
    fn test_new_process_defaults() {
        let process = Process::new(9, 4).with_phase(Phase::new(3, 1, 0));
        assert!(process.is_pending());
        assert_eq!(process.level, QueueLevel::HIGHEST);
        assert_eq!(process.phase(), Some(&Phase::new(3, 1, 0)));
        assert_eq!(process.wake_time(), None);
    }

    #[test]
    fn test_blocked_wake_time() {
        let mut process = Process::new(1, 0);
        process.state = ProcessState::Blocked { wake_time: 25 };
        assert_eq!(process.wake_time(), Some(25));
        assert!(!process.is_finished());
    }
}
