//! Scheduled-event types.
//!
//! These types represent calendar events in a source-agnostic way.
//! Draft generators and manual entry both produce them, the resolver
//! validates them, and the ICS layer serializes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One scheduled item.
///
/// `id` is unique within an [`crate::store::EventStore`] and stable across
/// export/import round-trips. When `is_all_day` is set, only the date
/// component of `start`/`end` is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    /// Contact addresses, order preserved through export.
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub category: Option<ScheduleCategory>,
    #[serde(default)]
    pub is_all_day: bool,
}

impl CalendarEvent {
    /// Create a timed event with a fresh id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        CalendarEvent {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            start,
            end,
            location: None,
            attendees: Vec::new(),
            category: None,
            is_all_day: false,
        }
    }

    /// Whether this event occupies time on the calendar.
    ///
    /// All-day items mark a date rather than a span and never collide
    /// with timed events.
    pub fn blocks_time(&self) -> bool {
        !self.is_all_day
    }
}

/// Closed set of schedule tags used for filtering and drafting.
///
/// Unknown labels from external sources fold into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleCategory {
    Work,
    Kids,
    Dinner,
    Hobbies,
    Goals,
    Fitness,
    Social,
    Other,
}

impl ScheduleCategory {
    pub const ALL: [ScheduleCategory; 8] = [
        ScheduleCategory::Work,
        ScheduleCategory::Kids,
        ScheduleCategory::Dinner,
        ScheduleCategory::Hobbies,
        ScheduleCategory::Goals,
        ScheduleCategory::Fitness,
        ScheduleCategory::Social,
        ScheduleCategory::Other,
    ];

    /// Display label, also used for the ICS `CATEGORIES` property.
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleCategory::Work => "Work",
            ScheduleCategory::Kids => "Kids",
            ScheduleCategory::Dinner => "Dinner",
            ScheduleCategory::Hobbies => "Hobbies",
            ScheduleCategory::Goals => "Goals",
            ScheduleCategory::Fitness => "Fitness",
            ScheduleCategory::Social => "Social",
            ScheduleCategory::Other => "Other",
        }
    }

    /// Case-insensitive label lookup with an `Other` fallback, so foreign
    /// category strings never fail to map.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label().to_ascii_lowercase() == normalized)
            .unwrap_or(ScheduleCategory::Other)
    }
}

impl fmt::Display for ScheduleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScheduleCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ScheduleCategory::from_label(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_new_event_gets_unique_ids() {
        let start = Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 20, 16, 0, 0).unwrap();
        let a = CalendarEvent::new("One", "", start, end);
        let b = CalendarEvent::new("Two", "", start, end);
        assert_ne!(a.id, b.id);
        assert!(!a.is_all_day);
    }

    #[test]
    fn test_category_label_roundtrip() {
        for category in ScheduleCategory::ALL {
            assert_eq!(ScheduleCategory::from_label(category.label()), category);
        }
    }

    #[test]
    fn test_unknown_category_folds_to_other() {
        assert_eq!(
            ScheduleCategory::from_label("meal_planning"),
            ScheduleCategory::Other
        );
        assert_eq!(ScheduleCategory::from_label(""), ScheduleCategory::Other);
    }

    #[test]
    fn test_category_label_is_case_insensitive() {
        assert_eq!(ScheduleCategory::from_label("FITNESS"), ScheduleCategory::Fitness);
        assert_eq!(ScheduleCategory::from_label(" work "), ScheduleCategory::Work);
    }
}
