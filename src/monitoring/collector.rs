/*!
 * Event Collection
 * The sink seam between the scheduler core and whatever consumes its events
 */

use super::events::Event;
use crate::core::SchedulerResult;
use parking_lot::Mutex;
use std::sync::Arc;

/// Consumer of the ordered event stream
///
/// A failing sink aborts the simulation; the error propagates out of `run`.
pub trait EventSink {
    fn emit(&mut self, event: Event) -> SchedulerResult<()>;
}

impl EventSink for Vec<Event> {
    #[inline]
    fn emit(&mut self, event: Event) -> SchedulerResult<()> {
        self.push(event);
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    #[inline]
    fn emit(&mut self, event: Event) -> SchedulerResult<()> {
        (**self).emit(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    #[inline]
    fn emit(&mut self, event: Event) -> SchedulerResult<()> {
        (**self).emit(event)
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn emit(&mut self, _event: Event) -> SchedulerResult<()> {
        Ok(())
    }
}

/// Thread-shareable event buffer
///
/// Clones share the same buffer, so one handle can drive a simulation while
/// another observes it from a different thread.
#[derive(Debug, Clone, Default)]
pub struct SharedCollector {
    events: Arc<Mutex<Vec<Event>>>,
}

impl SharedCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything collected so far
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Take everything collected so far
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for SharedCollector {
    fn emit(&mut self, event: Event) -> SchedulerResult<()> {
        self.events.lock().push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::events::Payload;

    #[test]
    fn test_shared_collector_clones_share_buffer() {
        let collector = SharedCollector::new();
        let mut writer = collector.clone();

        writer.emit(Event::new(0, Payload::Arrival { pid: 1 })).unwrap();
        writer.emit(Event::new(0, Payload::Create { pid: 1 })).unwrap();

        assert_eq!(collector.len(), 2);
        assert_eq!(collector.drain().len(), 2);
        assert!(collector.is_empty());
    }

    fn emit_arrival<S: EventSink>(mut sink: S) -> SchedulerResult<()> {
        sink.emit(Event::new(3, Payload::Arrival { pid: 9 }))
    }

    #[test]
    fn test_sink_through_mut_ref() {
        let mut events: Vec<Event> = Vec::new();
        emit_arrival(&mut events).unwrap();
        assert_eq!(events.len(), 1);
        assert!(emit_arrival(NullSink).is_ok());
    }
}
