/*!
 * Core Types
 * Common types used across the simulator
 */

use super::errors::SchedulerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process ID type
pub type Pid = u32;

/// Logical clock value, one unit per simulated tick
pub type Tick = u64;

/// Common result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Feedback queue level (1 is the most urgent, 4 the least)
///
/// The value is always within `[1, 4]`; the constructor and the
/// promote/demote helpers are the only ways to obtain one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QueueLevel(u8);

impl QueueLevel {
    /// Number of feedback levels
    pub const COUNT: usize = 4;

    /// Level every new process enters at
    pub const HIGHEST: Self = Self(1);

    /// Bottom level, never demoted further
    pub const LOWEST: Self = Self(4);

    /// All levels in dispatch priority order
    pub const ALL: [Self; Self::COUNT] = [Self(1), Self(2), Self(3), Self(4)];

    #[inline]
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level >= 1 && level <= Self::COUNT as u8 {
            Some(Self(level))
        } else {
            None
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-level tables
    #[inline(always)]
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// One level less urgent, saturating at the bottom level
    #[inline]
    #[must_use]
    pub const fn demoted(self) -> Self {
        if self.0 < Self::LOWEST.0 {
            Self(self.0 + 1)
        } else {
            self
        }
    }

    /// One level more urgent, saturating at the top level
    #[inline]
    #[must_use]
    pub const fn promoted(self) -> Self {
        if self.0 > Self::HIGHEST.0 {
            Self(self.0 - 1)
        } else {
            self
        }
    }
}

impl Default for QueueLevel {
    fn default() -> Self {
        Self::HIGHEST
    }
}

impl TryFrom<u8> for QueueLevel {
    type Error = SchedulerError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or(SchedulerError::InvalidLevel(level))
    }
}

impl From<QueueLevel> for u8 {
    fn from(level: QueueLevel) -> Self {
        level.0
    }
}

impl fmt::Display for QueueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bounds() {
        assert!(QueueLevel::new(0).is_none());
        assert!(QueueLevel::new(5).is_none());
        assert_eq!(QueueLevel::new(3).map(QueueLevel::get), Some(3));
    }

    #[test]
    fn test_demote_saturates() {
        assert_eq!(QueueLevel::HIGHEST.demoted().get(), 2);
        assert_eq!(QueueLevel::LOWEST.demoted(), QueueLevel::LOWEST);
    }

    #[test]
    fn test_promote_saturates() {
        assert_eq!(QueueLevel::LOWEST.promoted().get(), 3);
        assert_eq!(QueueLevel::HIGHEST.promoted(), QueueLevel::HIGHEST);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<QueueLevel>("2").is_ok());
        assert!(serde_json::from_str::<QueueLevel>("9").is_err());
    }
}
