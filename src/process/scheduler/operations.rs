/*!
 * Scheduler Core Operations
 * Dispatch, burst execution, idle accounting, and the main loop
 */

use super::{Scheduler, SimulationReport};
use crate::config::WakePolicy;
use crate::core::{Pid, QueueLevel, SchedulerError, SchedulerResult, Tick};
use crate::monitoring::collector::EventSink;
use crate::monitoring::events::{Event, Payload};
use crate::process::types::ProcessState;
use log::{debug, info, warn};

/// Outcome of one scheduling decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// A process ran for `burst` ticks from `level`
    Dispatched {
        pid: Pid,
        level: QueueLevel,
        burst: Tick,
    },
    /// Nothing was ready; the clock advanced one idle tick
    Idle,
    /// Every process has finished
    Complete,
}

impl Scheduler {
    /// Run until every process finishes, then emit the shutdown event
    pub fn run<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> SchedulerResult<SimulationReport> {
        info!(
            "Simulation starting with {} processes at time {}",
            self.registry.len(),
            self.clock
        );

        while self.step(sink)? != Decision::Complete {}

        let report = self.report();
        sink.emit(Event::new(
            self.clock,
            Payload::Shutdown {
                idle_ticks: report.idle_ticks,
                cpu_usage: report.cpu_usage.clone(),
            },
        ))?;

        info!(
            "Scheduler shutdown at time {} ({} idle ticks, {} dispatches)",
            report.final_clock, report.idle_ticks, report.stats.dispatches
        );
        Ok(report)
    }

    /// Make one scheduling decision
    ///
    /// Admits arrivals and wake-ups for the current tick, then either runs
    /// the most urgent ready process for one burst or burns one idle tick.
    pub fn step<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> SchedulerResult<Decision> {
        if self.registry.all_finished() {
            return Ok(Decision::Complete);
        }

        self.admit_arrivals(sink)?;
        self.wake_blocked(sink)?;

        match self.queues.pop_next() {
            Some((level, pid)) => {
                let burst = match self.execute(pid, level, sink) {
                    Ok(burst) => burst,
                    Err(e) => {
                        self.requeue_interrupted(pid, level);
                        return Err(e);
                    }
                };
                if let Err((ran, e)) = self.run_burst(pid, burst, sink) {
                    self.recover_burst(pid, level, burst, ran, sink);
                    return Err(e);
                }
                self.complete_burst(pid, level, burst, sink)?;
                Ok(Decision::Dispatched { pid, level, burst })
            }
            None => {
                self.ensure_progress()?;
                self.clock += 1;
                self.stats.idle_ticks += 1;
                Ok(Decision::Idle)
            }
        }
    }

    /// Dispatch `pid` and return the length of its burst
    ///
    /// RUN is emitted before any state changes, so a failing sink leaves the
    /// process exactly as it was popped.
    fn execute<S: EventSink + ?Sized>(
        &mut self,
        pid: Pid,
        level: QueueLevel,
        sink: &mut S,
    ) -> SchedulerResult<Tick> {
        let quantum = self.config.quantum(level);
        let process = self.registry.lookup(pid)?;
        let run_remaining = match process.run_remaining {
            0 => process
                .phase()
                .map(|phase| phase.run_ticks)
                .ok_or(SchedulerError::EmptyProcess(pid))?,
            remaining => remaining,
        };
        let burst = run_remaining.min(quantum);

        sink.emit(Event::new(
            self.clock,
            Payload::Run {
                pid,
                level,
                run_remaining,
            },
        ))?;

        let process = self.registry.lookup_mut(pid)?;
        process.run_remaining = run_remaining;
        process.state = ProcessState::Running;
        self.stats.dispatches += 1;
        debug!(
            "Dispatched process {} from level {} at {} for {} of {} ticks",
            pid, level, self.clock, burst, run_remaining
        );
        Ok(burst)
    }

    /// Advance the clock through `burst` ticks of `pid`
    ///
    /// On failure the error comes back with the number of ticks that ran.
    fn run_burst<S: EventSink + ?Sized>(
        &mut self,
        pid: Pid,
        burst: Tick,
        sink: &mut S,
    ) -> Result<(), (Tick, SchedulerError)> {
        for tick in 1..=burst {
            let process = self.registry.lookup_mut(pid).map_err(|e| (tick - 1, e))?;
            process.run_remaining -= 1;
            process.cpu_time += 1;
            self.clock += 1;
            self.stats.busy_ticks += 1;

            // Arrivals join L1 but do not preempt the running burst
            self.admit_arrivals(sink).map_err(|e| (tick, e))?;
        }
        Ok(())
    }

    /// Leave a burst cut short by a sink error in a resumable state
    ///
    /// A burst whose ticks all ran gets its normal transition; anything
    /// shorter goes back to the front of its queue with the work it did.
    fn recover_burst<S: EventSink + ?Sized>(
        &mut self,
        pid: Pid,
        level: QueueLevel,
        burst: Tick,
        ran: Tick,
        sink: &mut S,
    ) {
        if ran < burst {
            self.requeue_interrupted(pid, level);
        } else if let Err(e) = self.complete_burst(pid, level, burst, sink) {
            warn!("Process {} transition at {} not reported: {}", pid, self.clock, e);
        }
    }

    /// Put an interrupted process back at the front of its queue
    fn requeue_interrupted(&mut self, pid: Pid, level: QueueLevel) {
        let Ok(process) = self.registry.lookup_mut(pid) else {
            return;
        };
        if matches!(process.state, ProcessState::Ready | ProcessState::Running) {
            process.state = ProcessState::Ready;
            self.queues.push_front(level, pid);
            warn!(
                "Burst of process {} interrupted at {}; requeued at level {}",
                pid, self.clock, level
            );
        }
    }

    /// Fail instead of idling forever when nothing can ever become ready
    fn ensure_progress(&self) -> SchedulerResult<()> {
        let clock = self.clock;
        let policy = self.config.wake_policy;

        let stuck: Vec<Pid> = self
            .registry
            .iter()
            .filter(|process| match process.state {
                ProcessState::Pending => process.arrival_time < clock,
                // Between steps nothing is mid-burst
                ProcessState::Running => true,
                ProcessState::Blocked { wake_time } => {
                    policy == WakePolicy::ExactTick && wake_time < clock
                }
                _ => false,
            })
            .map(|process| process.pid)
            .collect();

        let waiting = self.registry.iter().any(|process| match process.state {
            ProcessState::Pending => process.arrival_time >= clock,
            ProcessState::Blocked { wake_time } => match policy {
                WakePolicy::ExactTick => wake_time >= clock,
                WakePolicy::Elapsed => true,
            },
            _ => false,
        });

        if waiting || stuck.is_empty() {
            return Ok(());
        }

        warn!(
            "Simulation stalled at {}: processes {:?} missed their wake-up",
            clock, stuck
        );
        Err(SchedulerError::Stalled { clock, pids: stuck })
    }
}
