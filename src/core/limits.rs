/*!
 * Scheduler Limits and Constants
 *
 * Default tables for the four feedback levels and storage bounds.
 * Index 0 is level 1 (highest priority).
 */

use super::types::{Tick, QueueLevel};

// =============================================================================
// QUANTA
// =============================================================================

/// Ticks a process may run per dispatch at each level
pub const DEFAULT_QUANTA: [Tick; QueueLevel::COUNT] = [10, 30, 100, 200];

// =============================================================================
// FEEDBACK THRESHOLDS
// =============================================================================

/// Consecutive quantum exhaustions before demotion (`None` = never)
pub const DEFAULT_DEMOTION_LIMITS: [Option<u32>; QueueLevel::COUNT] =
    [Some(1), Some(2), Some(2), None];

/// Consecutive voluntary yields before promotion (`None` = never)
pub const DEFAULT_PROMOTION_LIMITS: [Option<u32>; QueueLevel::COUNT] =
    [None, Some(1), Some(2), Some(2)];

// =============================================================================
// STORAGE BOUNDS
// =============================================================================

/// Maximum processes in one simulation
pub const DEFAULT_MAX_PROCESSES: usize = 4096;

/// Maximum phases per process
pub const DEFAULT_MAX_PHASES: usize = 256;
