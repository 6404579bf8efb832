//! Recording event sink.

use crate::domain::ForwardingEvent;
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;

/// Event sink collecting every emission, for tests and introspection.
#[derive(Default)]
pub struct RecordingEventSink {
    events: RwLock<Vec<ForwardingEvent>>,
}

impl RecordingEventSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event emitted so far.
    pub fn events(&self) -> Vec<ForwardingEvent> {
        self.events.read().clone()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: ForwardingEvent) {
        self.events.write().push(event);
    }
}
