//! Fixed-commitment constraints derived from preferences.
//!
//! Work hours and recurring tasks are time the user does not control.
//! The resolver asks this module whether a candidate span collides with
//! any of it.

use chrono::{DateTime, Datelike, Utc};

use crate::date_range::DateRange;
use crate::interval::intervals_overlap;
use crate::preferences::{Preferences, RecurringTask, WorkHours};
use crate::recurrence::expand_recurring_task;

#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub work_hours: Option<WorkHours>,
    pub recurring_tasks: Vec<RecurringTask>,
}

impl Constraints {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Constraints {
            work_hours: prefs.work_hours.clone(),
            recurring_tasks: prefs.recurring_tasks.clone(),
        }
    }

    /// Whether `instant` falls inside the working window on a work day.
    pub fn is_within_work_hours(&self, instant: DateTime<Utc>) -> bool {
        let Some(hours) = &self.work_hours else {
            return false;
        };
        let time = instant.time();
        hours.is_work_day(instant.weekday()) && hours.start <= time && time < hours.end
    }

    /// Whether `[start, end)` collides with a work-hours window or a
    /// recurring-task occurrence anywhere in `range`.
    pub fn conflicts_with_fixed_commitments(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        range: &DateRange,
    ) -> bool {
        if let Some(hours) = &self.work_hours {
            for day in range.days() {
                if !hours.is_work_day(day.weekday()) {
                    continue;
                }
                let window_start = day.and_time(hours.start).and_utc();
                let window_end = day.and_time(hours.end).and_utc();
                if intervals_overlap(start, end, window_start, window_end) {
                    return true;
                }
            }
        }
        self.recurring_tasks.iter().any(|task| {
            expand_recurring_task(task, range)
                .into_iter()
                .any(|(task_start, task_end)| intervals_overlap(start, end, task_start, task_end))
        })
    }
}
