//! Loading and saving the plan file.
//!
//! The plan file is the .ics serialization of the event store. Loading
//! parses it back into events, saving regenerates the whole document, so
//! the file on disk is always a valid calendar other tools can read.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use icalplan_core::ics::{generate_calendar, parse_calendar};
use icalplan_core::store::EventStore;

/// Read the plan file into an event store. A missing file is an empty plan.
pub fn load(path: &Path) -> Result<EventStore> {
    if !path.exists() {
        return Ok(EventStore::new());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
    let events =
        parse_calendar(&content).with_context(|| format!("Could not parse {}", path.display()))?;

    Ok(EventStore::from_events(events)?)
}

/// Write the store back to the plan file.
pub fn save(path: &Path, store: &EventStore, calendar_name: &str) -> Result<()> {
    let content = generate_calendar(store, calendar_name)?;
    fs::write(path, content).with_context(|| format!("Could not write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use icalplan_core::event::CalendarEvent;

    #[test]
    fn test_missing_file_is_an_empty_plan() {
        let store = load(Path::new("/nonexistent/plan.ics")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.ics");

        let mut store = EventStore::new();
        store
            .add(CalendarEvent::new(
                "Dinner",
                "",
                Utc.with_ymd_and_hms(2025, 3, 20, 18, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 3, 20, 19, 0, 0).unwrap(),
            ))
            .unwrap();

        save(&path, &store, "icalplan").unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.list()[0].title, "Dinner");
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.ics");
        fs::write(&path, "not a calendar").unwrap();

        assert!(load(&path).is_err());
    }
}
