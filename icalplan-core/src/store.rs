//! In-memory session store.

use std::collections::HashMap;

use crate::error::{PlanError, PlanResult};
use crate::event::CalendarEvent;

/// Holds the working set of events for one planning session.
///
/// Ids are unique; [`EventStore::add`] refuses duplicates and leaves the
/// store untouched when it does.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: HashMap<String, CalendarEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        EventStore::default()
    }

    pub fn from_events(events: Vec<CalendarEvent>) -> PlanResult<Self> {
        let mut store = EventStore::new();
        for event in events {
            store.add(event)?;
        }
        Ok(store)
    }

    pub fn add(&mut self, event: CalendarEvent) -> PlanResult<()> {
        if self.events.contains_key(&event.id) {
            return Err(PlanError::DuplicateId(event.id));
        }
        self.events.insert(event.id.clone(), event);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<CalendarEvent> {
        self.events.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.get(id)
    }

    /// Events ordered by start time, id as tiebreaker, so listings and
    /// exports come out the same way every run.
    pub fn list(&self) -> Vec<&CalendarEvent> {
        let mut events: Vec<&CalendarEvent> = self.events.values().collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        events
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.values()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
