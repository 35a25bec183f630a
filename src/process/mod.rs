/*!
 * Process Module
 * Process records, the registry that owns them, and the scheduler that drives them
 */

pub mod registry;
pub mod scheduler;
pub mod types;

// Re-export for convenience
pub use registry::ProcessRegistry;
pub use scheduler::{Decision, LevelQueues, Scheduler, SchedulerStats, SimulationReport};
pub use types::{Phase, Process, ProcessState};
