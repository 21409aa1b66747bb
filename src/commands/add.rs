use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use dialoguer::Input;
use owo_colors::OwoColorize;

use crate::session;
use icalplan_core::constraints::Constraints;
use icalplan_core::date_range::DateRange;
use icalplan_core::event::{CalendarEvent, ScheduleCategory};
use icalplan_core::preferences::Preferences;
use icalplan_core::resolver::resolve;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: &Path,
    prefs: &Preferences,
    title: Option<String>,
    start: Option<String>,
    end: Option<String>,
    duration: Option<String>,
    location: Option<String>,
    category: Option<String>,
    all_day: bool,
) -> Result<()> {
    let interactive = title.is_none() || start.is_none();

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Start ---
    let start = if let Some(s) = start {
        parse_instant(&s, all_day)?
    } else {
        let prompt = if all_day {
            "  When? (YYYY-MM-DD)"
        } else {
            "  When? (YYYY-MM-DDTHH:MM)"
        };
        prompt_with_retry(prompt, |input| parse_instant(input, all_day))?
    };

    // --- End ---
    let end = if let Some(end_input) = end {
        parse_instant(&end_input, all_day)?
    } else if let Some(dur_input) = duration {
        apply_duration(start, &dur_input)?
    } else if interactive && !all_day {
        prompt_duration(start)?
    } else {
        default_end(start, all_day)
    };

    // --- Location ---
    let location = if location.is_some() {
        location.filter(|loc| !loc.is_empty())
    } else if interactive {
        let loc: String = Input::new()
            .with_prompt("  Where? (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if loc.is_empty() { None } else { Some(loc) }
    } else {
        None
    };

    let mut event = CalendarEvent::new(title, "", start, end);
    event.location = location;
    event.category = category.as_deref().map(ScheduleCategory::from_label);
    event.is_all_day = all_day;

    let mut store = session::load(file)?;
    let constraints = Constraints::from_preferences(prefs);
    let range = DateRange::covering(event.start, event.end);
    let resolution = resolve(vec![event], &store, &constraints, &range);

    if let Some(rejected) = resolution.rejected.first() {
        anyhow::bail!("Not scheduled: {}", rejected.reason);
    }

    if interactive {
        println!();
    }
    for event in resolution.accepted {
        let title = event.title.clone();
        store.add(event)?;
        println!("{}", format!("  Created: {}", title).green());
    }
    session::save(file, &store, &prefs.calendar_name)?;

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<F>(prompt: &str, parse: F) -> Result<DateTime<Utc>>
where
    F: Fn(&str) -> Result<DateTime<Utc>>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Prompt for a duration with retry on parse errors. Empty input takes
/// the one-hour default.
fn prompt_duration(start: DateTime<Utc>) -> Result<DateTime<Utc>> {
    loop {
        let input: String = Input::new()
            .with_prompt("  How long? (1 hour)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return Ok(default_end(start, false));
        }
        match apply_duration(start, &input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Parse a date or date/time argument as UTC.
///
/// All-day events take a bare `YYYY-MM-DD`, timed ones `YYYY-MM-DDTHH:MM`
/// (a space instead of the `T` and trailing seconds are also accepted).
fn parse_instant(input: &str, all_day: bool) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    if all_day {
        let day = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
            anyhow::anyhow!("Could not parse date: \"{}\" (expected YYYY-MM-DD)", input)
        })?;
        return Ok(day.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];
    for format in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    anyhow::bail!(
        "Could not parse date/time: \"{}\" (expected YYYY-MM-DDTHH:MM)",
        input
    )
}

/// Apply a duration string (humantime syntax) to a start time.
fn apply_duration(start: DateTime<Utc>, dur_input: &str) -> Result<DateTime<Utc>> {
    let std_dur = humantime::parse_duration(dur_input)
        .map_err(|_| anyhow::anyhow!("Could not parse duration: \"{}\"", dur_input))?;
    let chrono_dur = Duration::from_std(std_dur).context("Duration too large")?;
    Ok(start + chrono_dur)
}

/// Default end: same instant for all-day events, +1 hour for timed ones.
fn default_end(start: DateTime<Utc>, all_day: bool) -> DateTime<Utc> {
    if all_day {
        start
    } else {
        start + Duration::hours(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timed_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap();
        assert_eq!(parse_instant("2025-03-20T15:00", false).unwrap(), expected);
        assert_eq!(parse_instant("2025-03-20 15:00", false).unwrap(), expected);
        assert_eq!(
            parse_instant("2025-03-20T15:00:00", false).unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_all_day_takes_a_bare_date() {
        let instant = parse_instant("2025-03-20", true).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_instant("next tuesday", false).is_err());
        assert!(parse_instant("2025-03-20", false).is_err());
        assert!(parse_instant("2025-03-20T15:00", true).is_err());
    }

    #[test]
    fn test_apply_duration() {
        let start = Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap();
        assert_eq!(
            apply_duration(start, "1h 30m").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 20, 16, 30, 0).unwrap()
        );
        assert!(apply_duration(start, "soon").is_err());
    }

    #[test]
    fn test_default_end() {
        let start = Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap();
        assert_eq!(
            default_end(start, false),
            Utc.with_ymd_and_hms(2025, 3, 20, 16, 0, 0).unwrap()
        );
        assert_eq!(default_end(start, true), start);
    }
}
