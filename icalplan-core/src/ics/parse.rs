//! ICS file parsing using the icalendar crate's parser.

use chrono::{DateTime, Utc};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{PlanError, PlanResult};
use crate::event::{CalendarEvent, ScheduleCategory};

/// Parse ICS content into calendar events.
///
/// The session file is UTC-only, so floating and zoned datetimes in
/// foreign calendars are read as UTC wall-clock values.
pub fn parse_calendar(content: &str) -> PlanResult<Vec<CalendarEvent>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| PlanError::IcsParse(e.to_string()))?;

    calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(parse_vevent)
        .collect()
}

fn parse_vevent(vevent: &Component) -> PlanResult<CalendarEvent> {
    // Required fields
    let id = vevent
        .find_prop("UID")
        .map(|p| p.val.to_string())
        .ok_or_else(|| PlanError::IcsParse("VEVENT is missing a UID".to_string()))?;

    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());

    let start_prop = vevent
        .find_prop("DTSTART")
        .ok_or_else(|| PlanError::IcsParse(format!("Event '{id}' is missing DTSTART")))?;
    let (start, is_all_day) = to_instant(
        DatePerhapsTime::try_from(start_prop)
            .map_err(|e| PlanError::IcsParse(format!("Event '{id}' has a bad DTSTART: {e}")))?,
    );

    // DTEND is optional; producers routinely omit it on all-day events,
    // in which case the event covers its start date.
    let end = match vevent.find_prop("DTEND") {
        Some(prop) => {
            let parsed = DatePerhapsTime::try_from(prop)
                .map_err(|e| PlanError::IcsParse(format!("Event '{id}' has a bad DTEND: {e}")))?;
            to_instant(parsed).0
        }
        None => start,
    };

    // Optional simple fields
    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| p.val.to_string())
        .unwrap_or_default();
    let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());

    let attendees: Vec<String> = vevent
        .properties
        .iter()
        .filter(|p| p.name == "ATTENDEE")
        .map(|p| {
            p.val
                .as_ref()
                .strip_prefix("mailto:")
                .unwrap_or(p.val.as_ref())
                .to_string()
        })
        .collect();

    let category = vevent
        .find_prop("CATEGORIES")
        .and_then(|p| {
            p.val
                .as_ref()
                .split(',')
                .next()
                .map(str::trim)
                .filter(|label| !label.is_empty())
        })
        .map(ScheduleCategory::from_label);

    Ok(CalendarEvent {
        id,
        title,
        description,
        start,
        end,
        location,
        attendees,
        category,
        is_all_day,
    })
}

fn to_instant(dpt: DatePerhapsTime) -> (DateTime<Utc>, bool) {
    match dpt {
        DatePerhapsTime::Date(d) => (d.and_hms_opt(0, 0, 0).unwrap().and_utc(), true),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => (dt, false),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => (naive.and_utc(), false),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. }) => {
            (date_time.and_utc(), false)
        }
    }
}
