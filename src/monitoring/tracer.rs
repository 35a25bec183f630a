/*!
 * Structured Tracing
 * Subscriber setup and a run-level span for simulations
 *
 * The scheduler core logs through the `log` facade; the subscriber bridges
 * those records so everything ends up in one stream on stderr.
 */

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Environment variable enabling JSON log output
pub const ENV_TRACE_JSON: &str = "MLFQ_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - MLFQ_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    match result {
        Ok(()) => info!(json = use_json, "Structured tracing initialized"),
        Err(e) => warn!(error = %e, "Tracing subscriber already installed"),
    }
}

/// Generate a unique trace ID for correlating one simulation run
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one simulation run
pub struct SimulationSpan {
    span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl SimulationSpan {
    pub fn new(processes: usize) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::INFO,
            "simulation",
            trace_id = %trace_id,
            processes = processes,
            final_clock = tracing::field::Empty,
            idle_ticks = tracing::field::Empty,
            duration_us = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        let _entered = span.enter();
        debug!(trace_id = %trace_id, processes, "simulation started");
        drop(_entered);

        Self {
            span,
            start: Instant::now(),
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Record final accounting on the span
    pub fn record_outcome(&self, final_clock: u64, idle_ticks: u64) {
        self.span.record("final_clock", final_clock);
        self.span.record("idle_ticks", idle_ticks);
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for SimulationSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", duration.as_micros() as u64);
        debug!(
            trace_id = %self.trace_id,
            duration_us = duration.as_micros() as u64,
            "simulation completed"
        );
    }
}
