//! ICS file generation.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::error::PlanResult;
use crate::event::CalendarEvent;
use crate::store::EventStore;

/// Generate a VCALENDAR document for every event in the store.
///
/// Events are emitted in listing order so output is stable run to run
/// apart from DTSTAMP, which carries the export time.
pub fn generate_calendar(store: &EventStore, calendar_name: &str) -> PlanResult<String> {
    let mut cal = Calendar::new();
    cal.name(calendar_name);
    cal.timezone("UTC");

    for event in store.list() {
        cal.push(build_vevent(event));
    }

    let cal = cal.done();
    Ok(strip_ics_bloat(&cal.to_string()))
}

fn build_vevent(event: &CalendarEvent) -> icalendar::Event {
    let mut vevent = icalendar::Event::new();
    vevent.uid(&event.id);
    vevent.summary(&event.title);

    // DTSTAMP - required by RFC 5545
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    vevent.add_property("DTSTAMP", &dtstamp);

    add_datetime_property(&mut vevent, "DTSTART", event, event.start);
    add_datetime_property(&mut vevent, "DTEND", event, event.end);

    vevent.description(&event.description);

    if let Some(ref location) = event.location {
        vevent.location(location);
    }

    // ATTENDEE (multi-property - can appear multiple times)
    for attendee in &event.attendees {
        vevent.append_multi_property(Property::new("ATTENDEE", format!("mailto:{attendee}")));
    }

    if let Some(category) = event.category {
        vevent.add_property("CATEGORIES", category.label());
    }

    vevent.done()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove NAME/TIMEZONE-ID duplicates of the X-WR- calendar properties
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:-//icalplan//EN\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN"
            || line.starts_with("NAME:")
            || line.starts_with("TIMEZONE-ID:")
        {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a datetime property, date-only for all-day events.
fn add_datetime_property(
    vevent: &mut icalendar::Event,
    name: &str,
    event: &CalendarEvent,
    instant: DateTime<Utc>,
) {
    if event.is_all_day {
        let mut prop = Property::new(name, instant.format("%Y%m%d").to_string());
        prop.append_parameter(ValueType::Date);
        vevent.append_property(prop);
    } else {
        vevent.add_property(name, instant.format("%Y%m%dT%H%M%SZ").to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ScheduleCategory;
    use chrono::TimeZone;

    fn timed_event() -> CalendarEvent {
        let mut event = CalendarEvent::new(
            "Test Event",
            "",
            Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 20, 16, 0, 0).unwrap(),
        );
        event.id = "test-event-123".to_string();
        event
    }

    fn store_with(events: Vec<CalendarEvent>) -> EventStore {
        EventStore::from_events(events).unwrap()
    }

    #[test]
    fn test_calendar_header_properties() {
        let ics = generate_calendar(&store_with(vec![timed_event()]), "Family Plan").unwrap();

        assert!(ics.contains("VERSION:2.0"), "ICS:\n{}", ics);
        assert!(ics.contains("PRODID:-//icalplan//EN"), "ICS:\n{}", ics);
        assert!(ics.contains("X-WR-CALNAME:Family Plan"), "ICS:\n{}", ics);
        assert!(ics.contains("X-WR-TIMEZONE:UTC"), "ICS:\n{}", ics);
        assert!(!ics.contains("CALSCALE:GREGORIAN"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_timed_event_uses_utc_datetimes() {
        let ics = generate_calendar(&store_with(vec![timed_event()]), "plan").unwrap();

        assert!(ics.contains("UID:test-event-123"), "ICS:\n{}", ics);
        assert!(ics.contains("SUMMARY:Test Event"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTART:20250320T150000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20250320T160000Z"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_all_day_event_has_value_date() {
        let mut event = timed_event();
        event.is_all_day = true;

        let ics = generate_calendar(&store_with(vec![event]), "plan").unwrap();

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20250320"),
            "DTSTART should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20250320"),
            "DTEND should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_attendees_emit_one_line_each_in_order() {
        let mut event = timed_event();
        event.attendees = vec![
            "alice@example.com".to_string(),
            "bob@example.com".to_string(),
        ];

        let ics = generate_calendar(&store_with(vec![event]), "plan").unwrap();

        let attendee_lines: Vec<&str> =
            ics.lines().filter(|l| l.starts_with("ATTENDEE")).collect();
        assert_eq!(
            attendee_lines,
            [
                "ATTENDEE:mailto:alice@example.com",
                "ATTENDEE:mailto:bob@example.com"
            ],
            "ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_category_and_location_are_emitted() {
        let mut event = timed_event();
        event.location = Some("Gym on 5th".to_string());
        event.category = Some(ScheduleCategory::Fitness);

        let ics = generate_calendar(&store_with(vec![event]), "plan").unwrap();

        assert!(ics.contains("LOCATION:Gym on 5th"), "ICS:\n{}", ics);
        assert!(ics.contains("CATEGORIES:Fitness"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_events_come_out_in_start_order() {
        let mut late = timed_event();
        late.id = "late".to_string();
        late.title = "Late".to_string();
        late.start = Utc.with_ymd_and_hms(2025, 3, 21, 9, 0, 0).unwrap();
        late.end = Utc.with_ymd_and_hms(2025, 3, 21, 10, 0, 0).unwrap();
        let mut early = timed_event();
        early.id = "early".to_string();
        early.title = "Early".to_string();

        let ics = generate_calendar(&store_with(vec![late, early]), "plan").unwrap();

        let early_pos = ics.find("SUMMARY:Early").unwrap();
        let late_pos = ics.find("SUMMARY:Late").unwrap();
        assert!(early_pos < late_pos, "ICS:\n{}", ics);
    }
}
