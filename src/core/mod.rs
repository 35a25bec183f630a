/*!
 * Core Module
 * Shared types, limits, and error definitions
 */

pub mod errors;
pub mod limits;
pub mod types;

pub use errors::SchedulerError;
pub use types::{Pid, QueueLevel, SchedulerResult, Tick};
