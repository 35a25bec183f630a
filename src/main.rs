/*!
 * MLFQ Simulator - Driver
 *
 * Reads a workload (file argument or stdin), runs the scheduler, and
 * writes the event trace to stdout.
 *
 * Environment variables:
 * - MLFQ_EVENTS_FORMAT: `text` (default) or `json`
 * - MLFQ_CONFIG, MLFQ_WAKE_POLICY, MLFQ_PROMOTION, MLFQ_MAX_PROCESSES,
 *   MLFQ_MAX_PHASES: scheduler configuration
 * - RUST_LOG, MLFQ_TRACE_JSON: diagnostics on stderr
 */

use miette::IntoDiagnostic;
use mlfq_sim::{
    init_tracing, EventSink, JsonLinesReporter, Scheduler, SchedulerConfig, SimulationSpan,
    TextReporter, Workload,
};
use std::io::{self, BufWriter};
use tracing::{info, warn};

fn main() -> miette::Result<()> {
    init_tracing();

    let config = SchedulerConfig::from_env()?;
    let workload = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "Reading workload file");
            Workload::from_path(&path)?
        }
        None => {
            info!("Reading workload from stdin");
            Workload::from_reader(io::stdin().lock())?
        }
    };
    if workload.truncated() {
        warn!(
            records = workload.len(),
            "Workload input ended in a malformed record; using the valid prefix"
        );
    }

    let mut scheduler = Scheduler::with_workload(config, &workload)?;
    let span = SimulationSpan::new(scheduler.registry().len());
    let _entered = span.enter();

    let stdout = BufWriter::new(io::stdout().lock());
    let format = std::env::var("MLFQ_EVENTS_FORMAT").unwrap_or_else(|_| "text".to_string());
    let mut sink: Box<dyn EventSink> = match format.as_str() {
        "json" => Box::new(JsonLinesReporter::new(stdout)),
        "text" => Box::new(TextReporter::new(stdout)),
        other => {
            return Err(miette::miette!(
                help = "Use MLFQ_EVENTS_FORMAT=text or MLFQ_EVENTS_FORMAT=json",
                "Unknown event format '{}'",
                other
            ))
        }
    };

    let report = scheduler.run(&mut sink).map_err(|e| {
        span.record_error(&e.to_string());
        e
    })?;
    span.record_outcome(report.final_clock, report.idle_ticks);

    info!(
        final_clock = report.final_clock,
        idle_ticks = report.idle_ticks,
        dispatches = report.stats.dispatches,
        "Simulation complete"
    );

    drop(sink);
    io::Write::flush(&mut io::stdout()).into_diagnostic()?;
    Ok(())
}
