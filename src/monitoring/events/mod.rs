/*!
 * Event System
 * Strongly-typed scheduler events, one per state change, in emission order
 */

use crate::core::{Pid, QueueLevel, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cumulative CPU usage of one process, reported at shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuUsage {
    pub pid: Pid,
    pub cpu_time: Tick,
}

/// Scheduler event stamped with the logical clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub clock: Tick,
    #[serde(flatten)]
    pub payload: Payload,
}

/// Event payload - one variant per kind of state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    /// Arrival tick reached
    Arrival { pid: Pid },
    /// Process entered the top-level ready queue
    Create { pid: Pid },
    /// Appended to a level queue
    Queued { pid: Pid, level: QueueLevel },
    /// Dispatched; `run_remaining` is the work left in the current burst
    Run {
        pid: Pid,
        level: QueueLevel,
        run_remaining: Tick,
    },
    /// Blocked on simulated I/O until `wake_time`
    IoBlock {
        pid: Pid,
        level: QueueLevel,
        wake_time: Tick,
    },
    /// Moved one level down; `level` is the new level
    Demoted { pid: Pid, level: QueueLevel },
    /// Moved one level up; `level` is the new level
    Promoted { pid: Pid, level: QueueLevel },
    /// All phases done
    Finished { pid: Pid, cpu_time: Tick },
    /// Terminal event with final accounting
    Shutdown {
        idle_ticks: Tick,
        cpu_usage: Vec<CpuUsage>,
    },
}

/// Discriminant of `Payload`, handy for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Arrival,
    Create,
    Queued,
    Run,
    IoBlock,
    Demoted,
    Promoted,
    Finished,
    Shutdown,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Arrival => "ARRIVAL",
            EventKind::Create => "CREATE",
            EventKind::Queued => "QUEUED",
            EventKind::Run => "RUN",
            EventKind::IoBlock => "IO_BLOCK",
            EventKind::Demoted => "DEMOTED",
            EventKind::Promoted => "PROMOTED",
            EventKind::Finished => "FINISHED",
            EventKind::Shutdown => "SHUTDOWN",
        };
        f.write_str(name)
    }
}

impl Event {
    #[inline]
    #[must_use]
    pub fn new(clock: Tick, payload: Payload) -> Self {
        Self { clock, payload }
    }

    pub fn kind(&self) -> EventKind {
        match self.payload {
            Payload::Arrival { .. } => EventKind::Arrival,
            Payload::Create { .. } => EventKind::Create,
            Payload::Queued { .. } => EventKind::Queued,
            Payload::Run { .. } => EventKind::Run,
            Payload::IoBlock { .. } => EventKind::IoBlock,
            Payload::Demoted { .. } => EventKind::Demoted,
            Payload::Promoted { .. } => EventKind::Promoted,
            Payload::Finished { .. } => EventKind::Finished,
            Payload::Shutdown { .. } => EventKind::Shutdown,
        }
    }

    /// Process the event concerns (`None` for shutdown)
    pub fn pid(&self) -> Option<Pid> {
        match self.payload {
            Payload::Arrival { pid }
            | Payload::Create { pid }
            | Payload::Queued { pid, .. }
            | Payload::Run { pid, .. }
            | Payload::IoBlock { pid, .. }
            | Payload::Demoted { pid, .. }
            | Payload::Promoted { pid, .. }
            | Payload::Finished { pid, .. } => Some(pid),
            Payload::Shutdown { .. } => None,
        }
    }

    /// Queue level carried by the event, if any
    pub fn level(&self) -> Option<QueueLevel> {
        match self.payload {
            Payload::Queued { level, .. }
            | Payload::Run { level, .. }
            | Payload::IoBlock { level, .. }
            | Payload::Demoted { level, .. }
            | Payload::Promoted { level, .. } => Some(level),
            _ => None,
        }
    }
}
