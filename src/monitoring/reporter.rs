/*!
 * Trace Reporters
 * Render the event stream as the classic text trace or as JSON lines
 */

use super::collector::EventSink;
use super::events::{Event, Payload};
use crate::core::{SchedulerError, SchedulerResult};
use std::fmt;
use std::io::Write;

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock;
        match &self.payload {
            Payload::Arrival { pid } => write!(f, "PID: {}, ARRIVAL TIME: {}", pid, clock),
            Payload::Create { pid } => write!(
                f,
                "CREATE: Process {} entered the ready queue at time {}.",
                pid, clock
            ),
            Payload::Queued { pid, level } => write!(
                f,
                "QUEUED: Process {} queued at level {} at time {}.",
                pid, level, clock
            ),
            Payload::Run {
                pid,
                level,
                run_remaining,
            } => write!(
                f,
                "RUN: Process {} started execution from level {} at time {}; wants to execute for {} ticks.",
                pid, level, clock, run_remaining
            ),
            Payload::IoBlock { pid, .. } => {
                write!(f, "I/O: Process {} blocked for I/O at time {}.", pid, clock)
            }
            Payload::Demoted { pid, level } => write!(
                f,
                "DEMOTED: Process {} moved to level {} at time {}.",
                pid, level, clock
            ),
            Payload::Promoted { pid, level } => write!(
                f,
                "PROMOTED: Process {} moved to level {} at time {}.",
                pid, level, clock
            ),
            Payload::Finished { pid, .. } => {
                write!(f, "FINISHED: Process {} finished at time {}.", pid, clock)
            }
            Payload::Shutdown {
                idle_ticks,
                cpu_usage,
            } => {
                writeln!(f, "Scheduler shutdown at time {}.", clock)?;
                writeln!(f, "Total CPU usage for all processes scheduled:")?;
                write!(f, "Process <<null>>:\t{} time units.", idle_ticks)?;
                for usage in cpu_usage {
                    write!(
                        f,
                        "\nProcess {}:\t\t{} time units.",
                        usage.pid, usage.cpu_time
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn sink_error(err: impl fmt::Display) -> SchedulerError {
    SchedulerError::Sink(err.to_string())
}

/// Writes one human-readable line per event
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for TextReporter<W> {
    fn emit(&mut self, event: Event) -> SchedulerResult<()> {
        writeln!(self.out, "{}", event).map_err(sink_error)?;
        if matches!(event.payload, Payload::Shutdown { .. }) {
            self.out.flush().map_err(sink_error)?;
        }
        Ok(())
    }
}

/// Writes one JSON object per event
#[derive(Debug)]
pub struct JsonLinesReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for JsonLinesReporter<W> {
    fn emit(&mut self, event: Event) -> SchedulerResult<()> {
        serde_json::to_writer(&mut self.out, &event).map_err(sink_error)?;
        self.out.write_all(b"\n").map_err(sink_error)?;
        if matches!(event.payload, Payload::Shutdown { .. }) {
            self.out.flush().map_err(sink_error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QueueLevel;
    use crate::monitoring::events::CpuUsage;

    #[test]
    fn test_run_line() {
        let event = Event::new(
            0,
            Payload::Run {
                pid: 1,
                level: QueueLevel::HIGHEST,
                run_remaining: 20,
            },
        );
        assert_eq!(
            event.to_string(),
            "RUN: Process 1 started execution from level 1 at time 0; wants to execute for 20 ticks."
        );
    }

    #[test]
    fn test_shutdown_block() {
        let event = Event::new(
            45,
            Payload::Shutdown {
                idle_ticks: 5,
                cpu_usage: vec![CpuUsage {
                    pid: 1,
                    cpu_time: 40,
                }],
            },
        );
        assert_eq!(
            event.to_string(),
            "Scheduler shutdown at time 45.\n\
             Total CPU usage for all processes scheduled:\n\
             Process <<null>>:\t5 time units.\n\
             Process 1:\t\t40 time units."
        );
    }

    #[test]
    fn test_text_reporter_writes_lines() {
        let mut reporter = TextReporter::new(Vec::new());
        reporter.emit(Event::new(2, Payload::Arrival { pid: 4 })).unwrap();
        reporter.emit(Event::new(2, Payload::Create { pid: 4 })).unwrap();

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            "PID: 4, ARRIVAL TIME: 2\nCREATE: Process 4 entered the ready queue at time 2.\n"
        );
    }

    #[test]
    fn test_json_reporter_round_trips() {
        let mut reporter = JsonLinesReporter::new(Vec::new());
        let event = Event::new(
            7,
            Payload::Finished {
                pid: 2,
                cpu_time: 7,
            },
        );
        reporter.emit(event.clone()).unwrap();

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        let parsed: Event = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(parsed, event);
    }
}
