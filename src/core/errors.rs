/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, Tick};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Capacity exceeded for {resource}: limit is {limit}")]
    #[diagnostic(
        code(scheduler::capacity_exceeded),
        help("Raise MLFQ_MAX_PROCESSES / MLFQ_MAX_PHASES or shrink the workload.")
    )]
    CapacityExceeded { resource: String, limit: usize },

    #[error("Invalid phase for process {pid}: {reason}")]
    #[diagnostic(
        code(scheduler::invalid_phase),
        help("Run, I/O, and repeat counts must all be non-negative.")
    )]
    InvalidPhase { pid: Pid, reason: String },

    #[error("Process {0} has no phases")]
    #[diagnostic(
        code(scheduler::empty_process),
        help("Every process needs at least one CPU phase.")
    )]
    EmptyProcess(Pid),

    #[error("Process {0} is already registered")]
    #[diagnostic(
        code(scheduler::duplicate_process),
        help("Use workload records to append phases to an existing process.")
    )]
    DuplicateProcess(Pid),

    #[error("Process {0} not found")]
    #[diagnostic(
        code(scheduler::process_not_found),
        help("The process was never registered with this scheduler.")
    )]
    ProcessNotFound(Pid),

    #[error("Queue level {0} out of range")]
    #[diagnostic(
        code(scheduler::invalid_level),
        help("Queue levels run from 1 (highest) to 4 (lowest).")
    )]
    InvalidLevel(u8),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(scheduler::configuration_error),
        help("Invalid configuration. Review configuration parameters.")
    )]
    Configuration(String),

    #[error("Simulation stalled at time {clock}: processes {pids:?} can never become ready")]
    #[diagnostic(
        code(scheduler::stalled),
        help("A wake-up tick was missed under exact-tick wake checks. Use the elapsed wake policy.")
    )]
    Stalled { clock: Tick, pids: Vec<Pid> },

    #[error("Event sink failed: {0}")]
    #[diagnostic(
        code(scheduler::sink_failed),
        help("The trace output could not be written. Check the output stream.")
    )]
    Sink(String),

    #[error("Workload read failed: {0}")]
    #[diagnostic(
        code(scheduler::workload_io),
        help("Check that the workload file exists and is readable.")
    )]
    Workload(String),
}

impl SchedulerError {
    /// Shorthand for capacity failures
    pub(crate) fn capacity(resource: impl Into<String>, limit: usize) -> Self {
        SchedulerError::CapacityExceeded {
            resource: resource.into(),
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = SchedulerError::Stalled {
            clock: 42,
            pids: vec![3],
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"error_type\":\"stalled\""));

        let back: SchedulerError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_error_display() {
        let err = SchedulerError::capacity("processes", 2);
        assert_eq!(
            err.to_string(),
            "Capacity exceeded for processes: limit is 2"
        );
    }
}
