//! Normalization of raw generator output.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PlanError, PlanResult};
use crate::event::{CalendarEvent, ScheduleCategory};

/// One candidate event exactly as a generator emitted it.
///
/// Generators are language-agnostic and loosely trusted, so dates and
/// categories arrive as strings here and get tightened in
/// [`RawDraftEvent::normalize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDraftEvent {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_all_day: bool,
}

impl RawDraftEvent {
    /// Tighten a raw candidate into a [`CalendarEvent`].
    ///
    /// Dates must be RFC 3339 or the naive `YYYY-MM-DDTHH:MM:SS` form
    /// (read as UTC); anything else fails instead of being guessed at.
    /// Missing or blank ids get a fresh uuid.
    pub fn normalize(self) -> PlanResult<CalendarEvent> {
        let start = parse_instant(&self.start_date)?;
        let end = parse_instant(&self.end_date)?;
        Ok(CalendarEvent {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title,
            description: self.description,
            start,
            end,
            location: self.location,
            attendees: self.attendees,
            category: self.category.as_deref().map(ScheduleCategory::from_label),
            is_all_day: self.is_all_day,
        })
    }
}

/// Normalize a whole batch, failing on the first bad candidate.
pub fn normalize_batch(raw: Vec<RawDraftEvent>) -> PlanResult<Vec<CalendarEvent>> {
    raw.into_iter().map(RawDraftEvent::normalize).collect()
}

fn parse_instant(raw: &str) -> PlanResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            PlanError::GenerationFailed(format!("Generator returned an unparseable date: '{raw}'"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(start: &str, end: &str) -> RawDraftEvent {
        RawDraftEvent {
            id: None,
            title: "Dinner".to_string(),
            description: String::new(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            location: None,
            attendees: Vec::new(),
            category: None,
            is_all_day: false,
        }
    }

    #[test]
    fn test_rfc3339_with_offset_converts_to_utc() {
        let event = raw("2025-03-20T20:00:00+02:00", "2025-03-20T21:00:00+02:00")
            .normalize()
            .unwrap();
        assert_eq!(
            event.start,
            Utc.with_ymd_and_hms(2025, 3, 20, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_naive_date_is_read_as_utc() {
        let event = raw("2025-03-20T20:00:00", "2025-03-20T21:00:00")
            .normalize()
            .unwrap();
        assert_eq!(
            event.start,
            Utc.with_ymd_and_hms(2025, 3, 20, 20, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_unparseable_date_fails_closed() {
        let result = raw("next tuesday evening", "2025-03-20T21:00:00").normalize();
        assert!(matches!(result, Err(PlanError::GenerationFailed(_))));
    }

    #[test]
    fn test_missing_or_blank_id_gets_a_fresh_uuid() {
        let event = raw("2025-03-20T20:00:00Z", "2025-03-20T21:00:00Z")
            .normalize()
            .unwrap();
        assert!(!event.id.is_empty());

        let mut blank = raw("2025-03-20T20:00:00Z", "2025-03-20T21:00:00Z");
        blank.id = Some("   ".to_string());
        assert!(!blank.normalize().unwrap().id.trim().is_empty());

        let mut kept = raw("2025-03-20T20:00:00Z", "2025-03-20T21:00:00Z");
        kept.id = Some("draft-7".to_string());
        assert_eq!(kept.normalize().unwrap().id, "draft-7");
    }

    #[test]
    fn test_unknown_category_folds_to_other() {
        let mut event = raw("2025-03-20T20:00:00Z", "2025-03-20T21:00:00Z");
        event.category = Some("mindfulness".to_string());
        assert_eq!(
            event.normalize().unwrap().category,
            Some(ScheduleCategory::Other)
        );
    }

    #[test]
    fn test_decodes_camel_case_wire_format() {
        let event: RawDraftEvent = serde_json::from_str(
            r#"{
                "title": "Picnic",
                "startDate": "2025-03-22T12:00:00Z",
                "endDate": "2025-03-22T14:00:00Z",
                "isAllDay": false,
                "category": "social"
            }"#,
        )
        .unwrap();
        let normalized = event.normalize().unwrap();
        assert_eq!(normalized.title, "Picnic");
        assert_eq!(normalized.category, Some(ScheduleCategory::Social));
        assert!(!normalized.is_all_day);
    }

    #[test]
    fn test_batch_fails_on_first_bad_candidate() {
        let batch = vec![
            raw("2025-03-20T20:00:00Z", "2025-03-20T21:00:00Z"),
            raw("garbage", "2025-03-20T21:00:00Z"),
        ];
        assert!(normalize_batch(batch).is_err());
    }
}
