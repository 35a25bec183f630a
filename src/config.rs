/*!
 * Scheduler Configuration
 *
 * Quantum and feedback tables, wake/promotion behaviour, and storage bounds.
 * Loadable from JSON and overridable from the environment.
 */

use crate::core::limits::{
    DEFAULT_DEMOTION_LIMITS, DEFAULT_MAX_PHASES, DEFAULT_MAX_PROCESSES, DEFAULT_PROMOTION_LIMITS,
    DEFAULT_QUANTA,
};
use crate::core::{QueueLevel, SchedulerError, SchedulerResult, Tick};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Environment variable naming a JSON config file
pub const ENV_CONFIG_PATH: &str = "MLFQ_CONFIG";
/// Environment variable overriding the wake policy
pub const ENV_WAKE_POLICY: &str = "MLFQ_WAKE_POLICY";
/// Environment variable overriding the promotion policy
pub const ENV_PROMOTION: &str = "MLFQ_PROMOTION";
/// Environment variable overriding the process limit
pub const ENV_MAX_PROCESSES: &str = "MLFQ_MAX_PROCESSES";
/// Environment variable overriding the per-process phase limit
pub const ENV_MAX_PHASES: &str = "MLFQ_MAX_PHASES";

/// When a blocked process is considered ready again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WakePolicy {
    /// Wake only when the scheduling decision lands exactly on the wake tick.
    /// A wake tick that passes inside another process's burst is missed.
    ExactTick,
    /// Wake at the first scheduling decision at or after the wake tick
    Elapsed,
}

impl WakePolicy {
    #[inline]
    pub fn is_due(self, wake_time: Tick, clock: Tick) -> bool {
        match self {
            WakePolicy::ExactTick => wake_time == clock,
            WakePolicy::Elapsed => wake_time <= clock,
        }
    }
}

impl FromStr for WakePolicy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "exact_tick" | "exact-tick" => Ok(WakePolicy::ExactTick),
            "elapsed" => Ok(WakePolicy::Elapsed),
            other => Err(SchedulerError::Configuration(format!(
                "unknown wake policy '{}'",
                other
            ))),
        }
    }
}

/// Whether voluntary yields can move a process back up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionPolicy {
    /// Promotion table is never consulted
    Inert,
    /// An I/O block before the quantum runs out counts as a yield
    OnYield,
}

impl FromStr for PromotionPolicy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inert" => Ok(PromotionPolicy::Inert),
            "on_yield" | "on-yield" | "yield" => Ok(PromotionPolicy::OnYield),
            other => Err(SchedulerError::Configuration(format!(
                "unknown promotion policy '{}'",
                other
            ))),
        }
    }
}

/// Configuration for one simulation instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Quantum per level in ticks (default: 10, 30, 100, 200)
    pub quanta: [Tick; QueueLevel::COUNT],

    /// Exhaustion streak before demotion (default: 1, 2, 2, never)
    pub demotion_limits: [Option<u32>; QueueLevel::COUNT],

    /// Yield streak before promotion (default: never, 1, 2, 2)
    pub promotion_limits: [Option<u32>; QueueLevel::COUNT],

    /// Wake-up check (default: elapsed)
    pub wake_policy: WakePolicy,

    /// Promotion trigger (default: inert)
    pub promotion_policy: PromotionPolicy,

    /// Maximum registered processes
    pub max_processes: usize,

    /// Maximum phases per process
    pub max_phases: usize,
}

impl SchedulerConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            quanta: DEFAULT_QUANTA,
            demotion_limits: DEFAULT_DEMOTION_LIMITS,
            promotion_limits: DEFAULT_PROMOTION_LIMITS,
            wake_policy: WakePolicy::Elapsed,
            promotion_policy: PromotionPolicy::Inert,
            max_processes: DEFAULT_MAX_PROCESSES,
            max_phases: DEFAULT_MAX_PHASES,
        }
    }

    /// Configuration that reproduces reference traces exactly
    pub fn reference() -> Self {
        Self {
            wake_policy: WakePolicy::ExactTick,
            ..Self::new()
        }
    }

    /// Configuration with promotion wired to voluntary yields
    pub fn adaptive() -> Self {
        Self {
            promotion_policy: PromotionPolicy::OnYield,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_wake_policy(mut self, policy: WakePolicy) -> Self {
        self.wake_policy = policy;
        self
    }

    #[must_use]
    pub fn with_promotion_policy(mut self, policy: PromotionPolicy) -> Self {
        self.promotion_policy = policy;
        self
    }

    #[must_use]
    pub fn with_quanta(mut self, quanta: [Tick; QueueLevel::COUNT]) -> Self {
        self.quanta = quanta;
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, max_processes: usize, max_phases: usize) -> Self {
        self.max_processes = max_processes;
        self.max_phases = max_phases;
        self
    }

    #[inline(always)]
    pub fn quantum(&self, level: QueueLevel) -> Tick {
        self.quanta[level.index()]
    }

    #[inline(always)]
    pub fn demotion_limit(&self, level: QueueLevel) -> Option<u32> {
        self.demotion_limits[level.index()]
    }

    #[inline(always)]
    pub fn promotion_limit(&self, level: QueueLevel) -> Option<u32> {
        self.promotion_limits[level.index()]
    }

    /// Reject tables that would stall or misbehave
    pub fn validate(&self) -> SchedulerResult<()> {
        for level in QueueLevel::ALL {
            if self.quantum(level) == 0 {
                return Err(SchedulerError::Configuration(format!(
                    "quantum for level {} must be at least 1 tick",
                    level
                )));
            }
            if self.demotion_limit(level) == Some(0) || self.promotion_limit(level) == Some(0) {
                return Err(SchedulerError::Configuration(format!(
                    "feedback limits for level {} must be at least 1 or never",
                    level
                )));
            }
        }
        if self.max_processes == 0 || self.max_phases == 0 {
            return Err(SchedulerError::Configuration(
                "capacity limits must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> SchedulerResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SchedulerError::Configuration(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> SchedulerResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SchedulerError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Build from process environment
    ///
    /// Environment variables:
    /// - MLFQ_CONFIG: JSON config file used as the base (default: built-in defaults)
    /// - MLFQ_WAKE_POLICY: `exact` or `elapsed`
    /// - MLFQ_PROMOTION: `inert` or `on-yield`
    /// - MLFQ_MAX_PROCESSES / MLFQ_MAX_PHASES: capacity limits
    pub fn from_env() -> SchedulerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> SchedulerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG_PATH) {
            Some(path) => Self::from_path(path)?,
            None => Self::new(),
        };

        if let Some(value) = lookup(ENV_WAKE_POLICY) {
            config.wake_policy = value.parse()?;
        }
        if let Some(value) = lookup(ENV_PROMOTION) {
            config.promotion_policy = value.parse()?;
        }
        if let Some(value) = lookup(ENV_MAX_PROCESSES) {
            config.max_processes = parse_limit(ENV_MAX_PROCESSES, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_PHASES) {
            config.max_phases = parse_limit(ENV_MAX_PHASES, &value)?;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_limit(key: &str, value: &str) -> SchedulerResult<usize> {
    value.trim().parse().map_err(|_| {
        SchedulerError::Configuration(format!("{} must be a positive integer, got '{}'", key, value))
    })
}
