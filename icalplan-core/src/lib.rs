//! Core engine for the icalplan ecosystem.
//!
//! This crate provides the schedule-synthesis and calendar-export engine
//! used by the `icalplan` CLI:
//! - `event`: the `CalendarEvent` data model and schedule categories
//! - `preferences`: work hours and recurring fixed commitments
//! - `constraints` + `resolver`: conflict-free merging of draft events
//! - `store`: the in-memory session event store
//! - `ics`: export to and import from the `.ics` interchange format
//! - `generator`: the draft-generator subprocess boundary

pub mod config;
pub mod constants;
pub mod constraints;
pub mod date_range;
pub mod error;
pub mod event;
pub mod generator;
pub mod ics;
pub mod interval;
pub mod preferences;
pub mod recurrence;
pub mod resolver;
pub mod store;

// Re-export the event types at crate root for convenience
pub use error::{PlanError, PlanResult};
pub use event::*;
