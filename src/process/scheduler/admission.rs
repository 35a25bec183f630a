/*!
 * Admission
 * Moves arrivals into the top queue and woken processes back into theirs
 */

use super::Scheduler;
use crate::core::{Pid, QueueLevel, SchedulerResult, Tick};
use crate::monitoring::collector::EventSink;
use crate::monitoring::events::{Event, Payload};
use crate::process::types::ProcessState;
use log::debug;

impl Scheduler {
    /// Admit every pending process whose arrival tick is now
    ///
    /// Runs at each scheduling decision and after every tick of a burst.
    /// Registration order decides FIFO placement for simultaneous arrivals.
    pub(super) fn admit_arrivals<S: EventSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> SchedulerResult<usize> {
        let clock = self.clock;
        let mut admitted = 0;

        for process in self.registry.iter_mut() {
            if !process.is_pending() || process.arrival_time != clock {
                continue;
            }

            process.state = ProcessState::Ready;
            process.level = QueueLevel::HIGHEST;
            self.queues.push(QueueLevel::HIGHEST, process.pid);

            sink.emit(Event::new(clock, Payload::Arrival { pid: process.pid }))?;
            sink.emit(Event::new(clock, Payload::Create { pid: process.pid }))?;
            debug!("Process {} arrived at {}", process.pid, clock);
            admitted += 1;
        }

        self.stats.arrivals += admitted as u64;
        Ok(admitted)
    }

    /// Requeue blocked processes whose I/O has completed
    ///
    /// Only runs at the top of a scheduling decision. Under the exact-tick
    /// policy a wake tick that passes during a burst is never seen again.
    /// Under the elapsed policy several overdue processes can wake at once;
    /// they are queued by wake tick, registration order breaking ties.
    pub(super) fn wake_blocked<S: EventSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> SchedulerResult<usize> {
        let clock = self.clock;
        let policy = self.config.wake_policy;

        let mut due: Vec<(Tick, usize, Pid)> = self
            .registry
            .iter()
            .enumerate()
            .filter_map(|(slot, process)| {
                process
                    .wake_time()
                    .filter(|&wake_time| policy.is_due(wake_time, clock))
                    .map(|wake_time| (wake_time, slot, process.pid))
            })
            .collect();
        due.sort_unstable();

        for &(wake_time, _, pid) in &due {
            let process = self.registry.lookup_mut(pid)?;
            process.state = ProcessState::Ready;
            let level = process.level;
            self.queues.push(level, pid);
            self.stats.wakeups += 1;

            sink.emit(Event::new(clock, Payload::Queued { pid, level }))?;
            debug!(
                "Process {} woke at {} (due {}) into level {}",
                pid, clock, wake_time, level
            );
        }

        Ok(due.len())
    }
}
