//! Expansion of recurring tasks into concrete occurrences.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::date_range::DateRange;
use crate::preferences::{Frequency, RecurringTask};

/// All `(start, end)` occurrences of `task` on days inside `range`.
///
/// Biweekly tasks anchor their on-week to the first week of the range.
/// Monthly tasks fire on the first qualifying day of each month.
pub fn expand_recurring_task(
    task: &RecurringTask,
    range: &DateRange,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let anchor_week = week_ordinal(range.from.date_naive());
    let mut last_month: Option<(i32, u32)> = None;
    let mut occurrences = Vec::new();

    for day in range.days() {
        let selected = match task.frequency {
            Frequency::Daily | Frequency::Weekly => matches_day(task, day),
            Frequency::Biweekly => {
                matches_day(task, day) && (week_ordinal(day) - anchor_week).rem_euclid(2) == 0
            }
            Frequency::Monthly => {
                let month = (day.year(), day.month());
                if matches_day(task, day) && last_month != Some(month) {
                    last_month = Some(month);
                    true
                } else {
                    false
                }
            }
        };
        if !selected {
            continue;
        }
        let start = day.and_time(task.start).and_utc();
        occurrences.push((start, start + task.duration_chrono()));
    }

    occurrences
}

fn matches_day(task: &RecurringTask, day: NaiveDate) -> bool {
    task.days.is_empty() || task.days.contains(&day.weekday())
}

/// Weeks since the common era, Monday-aligned, so consecutive Mondays
/// differ by exactly one.
fn week_ordinal(day: NaiveDate) -> i32 {
    (day.num_days_from_ce() - day.weekday().num_days_from_monday() as i32) / 7
}
