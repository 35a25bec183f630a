/*!
 * MLFQ Simulator Library
 * Deterministic multilevel feedback queue scheduler over synthetic workloads
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod workload;

// Re-exports
pub use config::{PromotionPolicy, SchedulerConfig, WakePolicy};
pub use crate::core::{Pid, QueueLevel, SchedulerError, SchedulerResult, Tick};
pub use monitoring::{
    init_tracing, CpuUsage, Event, EventKind, EventSink, JsonLinesReporter, NullSink, Payload,
    SharedCollector, SimulationSpan, TextReporter,
};
pub use process::{
    Decision, Phase, Process, ProcessRegistry, ProcessState, Scheduler, SchedulerStats,
    SimulationReport,
};
pub use workload::{parse_workload, Workload, WorkloadRecord};

/// Run `workload` to completion and collect every event
pub fn simulate(
    config: SchedulerConfig,
    workload: &Workload,
) -> SchedulerResult<(Vec<Event>, SimulationReport)> {
    let mut scheduler = Scheduler::with_workload(config, workload)?;
    let span = SimulationSpan::new(scheduler.registry().len());
    let _entered = span.enter();

    let mut events = Vec::new();
    match scheduler.run(&mut events) {
        Ok(report) => {
            span.record_outcome(report.final_clock, report.idle_ticks);
            Ok((events, report))
        }
        Err(e) => {
            span.record_error(&e.to_string());
            Err(e)
        }
    }
}
