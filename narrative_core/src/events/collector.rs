//! Event collector - the append-only log of a chapter.

use serde_json::{json, Value};
use story_world::World;

use super::Event;

/// The chronological log of everything that happened in one chapter.
///
/// Order is exactly the order of collection; nothing ever reorders it.
#[derive(Debug, Clone, Default)]
pub struct EventCollector {
    events: Vec<Event>,
}

impl EventCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// A JSON view of the log for debugging: names instead of ids, plus the rendered text.
    pub fn dump(&self, world: &World) -> Value {
        Value::Array(
            self.events
                .iter()
                .map(|event| {
                    json!({
                        "phrase": event.phrase,
                        "participants": event
                            .participants
                            .iter()
                            .map(|id| world.name(*id))
                            .collect::<Vec<_>>(),
                        "location": world.name(event.location),
                        "text": event.render(world),
                    })
                })
                .collect(),
        )
    }
}
