/*!
 * MLFQ Scheduler
 * Four-level feedback-queue scheduler driven by a logical clock
 *
 * One `Scheduler` is one self-contained simulation: registry, ready queues,
 * clock and counters all live here and are mutated only through `&mut self`.
 */

use crate::config::SchedulerConfig;
use crate::core::{Pid, QueueLevel, SchedulerResult, Tick};
use crate::process::registry::ProcessRegistry;
use crate::process::types::Process;
use crate::workload::{Workload, WorkloadRecord};
use log::info;

mod admission;
mod operations;
mod queues;
mod stats;
mod transition;

pub use operations::Decision;
pub use queues::LevelQueues;
pub use stats::{SchedulerStats, SimulationReport};

/// Multilevel feedback queue scheduler
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: SchedulerConfig,
    registry: ProcessRegistry,
    queues: LevelQueues,
    clock: Tick,
    stats: SchedulerStats,
}

impl Scheduler {
    /// Create an empty scheduler after validating `config`
    pub fn new(config: SchedulerConfig) -> SchedulerResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create a scheduler and register a whole workload
    pub fn with_workload(config: SchedulerConfig, workload: &Workload) -> SchedulerResult<Self> {
        let mut scheduler = Self::new(config)?;
        scheduler.load(workload)?;
        Ok(scheduler)
    }

    fn build(config: SchedulerConfig) -> Self {
        info!(
            "Scheduler initialized: quanta={:?}, wake={:?}, promotion={:?}",
            config.quanta, config.wake_policy, config.promotion_policy
        );

        Self {
            registry: ProcessRegistry::from_config(&config),
            config,
            queues: LevelQueues::new(),
            clock: 0,
            stats: SchedulerStats::default(),
        }
    }

    /// Register every record of `workload` in order
    pub fn load(&mut self, workload: &Workload) -> SchedulerResult<usize> {
        for record in workload.records() {
            self.add_record(record)?;
        }
        info!(
            "Loaded {} workload records into {} processes",
            workload.len(),
            self.registry.len()
        );
        Ok(workload.len())
    }

    /// Register one workload record, merging phases by pid
    pub fn add_record(&mut self, record: &WorkloadRecord) -> SchedulerResult<Pid> {
        self.registry.add_record(record)
    }

    /// Register a fully built process
    ///
    /// Processes must be registered before their arrival tick has passed;
    /// a late registration can never be admitted.
    pub fn add_process(&mut self, process: Process) -> SchedulerResult<()> {
        self.registry.insert(process)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.registry.get(pid)
    }

    pub fn queues(&self) -> &LevelQueues {
        &self.queues
    }

    /// Ready pids at `level`, front first
    pub fn ready(&self, level: QueueLevel) -> Vec<Pid> {
        self.queues.iter_level(level).collect()
    }

    /// Current logical time
    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn is_finished(&self) -> bool {
        self.registry.all_finished()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::build(SchedulerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SchedulerError;
    use crate::monitoring::events::{Event, EventKind};
    use crate::process::types::ProcessState;

    fn scheduler_with(records: &[(Tick, Pid, i64, i64, i64)]) -> Scheduler {
        let workload: Workload = records
            .iter()
            .map(|&(t, pid, run, io, repeat)| WorkloadRecord::new(t, pid, run, io, repeat))
            .collect();
        Scheduler::with_workload(SchedulerConfig::default(), &workload).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SchedulerConfig::new().with_quanta([0, 30, 100, 200]);
        assert!(matches!(
            Scheduler::new(config),
            Err(SchedulerError::Configuration(_))
        ));
    }

    #[test]
    fn test_two_short_processes() {
        let mut scheduler = scheduler_with(&[(0, 1, 5, 0, 0), (0, 2, 5, 0, 0)]);
        let mut events = Vec::new();
        let report = scheduler.run(&mut events).unwrap();

        assert_eq!(report.final_clock, 10);
        assert_eq!(report.idle_ticks, 0);
        assert_eq!(report.cpu_time(1), Some(5));
        assert_eq!(report.cpu_time(2), Some(5));
        assert!(events.iter().all(|e| e.kind() != EventKind::Demoted));

        let finished: Vec<(Pid, Tick)> = events
            .iter()
            .filter(|e| e.kind() == EventKind::Finished)
            .map(|e| (e.pid().unwrap(), e.clock))
            .collect();
        assert_eq!(finished, vec![(1, 5), (2, 10)]);
    }

    #[test]
    fn test_step_idles_until_arrival() {
        let mut scheduler = scheduler_with(&[(3, 1, 1, 0, 0)]);
        let mut events: Vec<Event> = Vec::new();

        for _ in 0..3 {
            assert_eq!(scheduler.step(&mut events).unwrap(), Decision::Idle);
        }
        assert_eq!(scheduler.clock(), 3);
        assert!(events.is_empty());

        let decision = scheduler.step(&mut events).unwrap();
        assert!(matches!(decision, Decision::Dispatched { pid: 1, burst: 1, .. }));
        assert_eq!(scheduler.step(&mut events).unwrap(), Decision::Complete);
        assert_eq!(scheduler.stats().idle_ticks, 3);
    }

    #[test]
    fn test_orphaned_running_process_reports_stall() {
        let mut scheduler = scheduler_with(&[(0, 1, 5, 0, 0)]);
        scheduler.registry.lookup_mut(1).unwrap().state = ProcessState::Running;
        let mut events: Vec<Event> = Vec::new();

        assert_eq!(
            scheduler.step(&mut events),
            Err(SchedulerError::Stalled {
                clock: 0,
                pids: vec![1]
            })
        );
    }

    #[test]
    fn test_empty_scheduler_shuts_down_immediately() {
        let mut scheduler = Scheduler::default();
        let mut events = Vec::new();
        let report = scheduler.run(&mut events).unwrap();

        assert_eq!(report.final_clock, 0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::Shutdown);
    }
}
