use super::{Event, Listener};

/// Listener that keeps every event it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecorder {
    events: Vec<Event>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl Listener for EventRecorder {
    fn on_event(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}
