/*!
 * Monitoring Module
 * Scheduler events, sinks, reporters, and tracing setup
 */

pub mod collector;
pub mod events;
pub mod reporter;
pub mod tracer;

pub use collector::{EventSink, NullSink, SharedCollector};
pub use events::{CpuUsage, Event, EventKind, Payload};
pub use reporter::{JsonLinesReporter, TextReporter};
pub use tracer::{init_tracing, SimulationSpan};
