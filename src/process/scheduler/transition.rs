/*!
 * Burst Transitions
 * Phase/repeat bookkeeping, I/O blocking, completion, and level feedback
 */

use super::Scheduler;
use crate::config::PromotionPolicy;
use crate::core::{Pid, QueueLevel, SchedulerError, SchedulerResult, Tick};
use crate::monitoring::collector::EventSink;
use crate::monitoring::events::{Event, Payload};
use crate::process::types::ProcessState;
use log::debug;

impl Scheduler {
    /// Apply the outcome of a finished burst to `pid`
    ///
    /// `level` is the level the burst ran at. A burst that emptied
    /// `run_remaining` ends the current repeat; anything else means the
    /// full quantum was used.
    pub(super) fn complete_burst<S: EventSink + ?Sized>(
        &mut self,
        pid: Pid,
        level: QueueLevel,
        burst: Tick,
        sink: &mut S,
    ) -> SchedulerResult<()> {
        let run_remaining = self.registry.lookup(pid)?.run_remaining;

        if run_remaining == 0 {
            self.end_repeat(pid, level, burst, sink)
        } else {
            debug_assert_eq!(burst, self.config.quantum(level));
            self.exhaust_quantum(pid, level, sink)
        }
    }

    /// CPU work of the current repeat is done
    fn end_repeat<S: EventSink + ?Sized>(
        &mut self,
        pid: Pid,
        level: QueueLevel,
        burst: Tick,
        sink: &mut S,
    ) -> SchedulerResult<()> {
        let clock = self.clock;
        let quantum = self.config.quantum(level);
        let promotion_limit = self.config.promotion_limit(level);
        let rewire_yields = self.config.promotion_policy == PromotionPolicy::OnYield;

        let process = self.registry.lookup_mut(pid)?;
        let phase = *process.phase().ok_or(SchedulerError::EmptyProcess(pid))?;

        if process.current_repeat < phase.repeat_count {
            let mut promoted = None;
            if rewire_yields && burst < quantum {
                process.yield_count += 1;
                if promotion_limit.is_some_and(|limit| process.yield_count >= limit) {
                    process.level = process.level.promoted();
                    process.yield_count = 0;
                    promoted = Some(process.level);
                }
            }

            let wake_time = clock + phase.io_ticks;
            process.current_repeat += 1;
            process.exhaustion_count = 0;
            process.state = ProcessState::Blocked { wake_time };
            let new_level = process.level;

            if let Some(level) = promoted {
                self.stats.promotions += 1;
                sink.emit(Event::new(clock, Payload::Promoted { pid, level }))?;
                debug!("Process {} promoted to level {} at {}", pid, level, clock);
            }

            self.stats.io_blocks += 1;
            sink.emit(Event::new(
                clock,
                Payload::IoBlock {
                    pid,
                    level: new_level,
                    wake_time,
                },
            ))?;
            debug!("Process {} blocked until {}", pid, wake_time);
            return Ok(());
        }

        process.current_phase += 1;
        process.current_repeat = 0;

        if process.current_phase >= process.phases.len() {
            process.state = ProcessState::Finished;
            process.finish_time = Some(clock);
            let cpu_time = process.cpu_time;

            self.stats.finished += 1;
            sink.emit(Event::new(clock, Payload::Finished { pid, cpu_time }))?;
            debug!("Process {} finished at {} after {} ticks", pid, clock, cpu_time);
            return Ok(());
        }

        // Next phase starts fresh on the following dispatch
        process.run_remaining = 0;
        process.state = ProcessState::Ready;
        let level = process.level;
        self.queues.push(level, pid);
        sink.emit(Event::new(clock, Payload::Queued { pid, level }))?;
        Ok(())
    }

    /// Quantum used up with work left: count it, maybe demote, requeue
    fn exhaust_quantum<S: EventSink + ?Sized>(
        &mut self,
        pid: Pid,
        level: QueueLevel,
        sink: &mut S,
    ) -> SchedulerResult<()> {
        let clock = self.clock;
        let demotion_limit = self.config.demotion_limit(level);
        let rewire_yields = self.config.promotion_policy == PromotionPolicy::OnYield;

        let process = self.registry.lookup_mut(pid)?;
        process.exhaustion_count += 1;
        if rewire_yields {
            process.yield_count = 0;
        }

        let demote = demotion_limit.is_some_and(|limit| process.exhaustion_count >= limit);
        if demote {
            process.level = process.level.demoted();
            process.exhaustion_count = 0;
        }
        process.state = ProcessState::Ready;
        let new_level = process.level;

        // Requeued before any event goes out
        self.queues.push(new_level, pid);
        self.stats.preemptions += 1;
        if demote {
            self.stats.demotions += 1;
            sink.emit(Event::new(
                clock,
                Payload::Demoted {
                    pid,
                    level: new_level,
                },
            ))?;
            debug!("Process {} demoted to level {} at {}", pid, new_level, clock);
        }

        sink.emit(Event::new(
            clock,
            Payload::Queued {
                pid,
                level: new_level,
            },
        ))?;
        Ok(())
    }
}
