//! User scheduling preferences.
//!
//! Loaded from the TOML config file (see [`crate::config`]). Work hours and
//! recurring tasks double as fixed commitments during conflict resolution,
//! see [`crate::constraints`].

use chrono::{Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::event::ScheduleCategory;

/// The daily working window and which weekdays it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHours {
    #[serde(with = "time_of_day")]
    pub start: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end: NaiveTime,
    pub days: Vec<Weekday>,
}

impl Default for WorkHours {
    fn default() -> Self {
        WorkHours {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
        }
    }
}

impl WorkHours {
    pub fn is_work_day(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }
}

/// How often a recurring task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

/// A standing commitment that recurs on a schedule, e.g. a weekly class.
///
/// `days` narrows which weekdays qualify; an empty list means any day.
/// Expansion into concrete occurrences lives in [`crate::recurrence`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTask {
    #[serde(default = "new_task_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "time_of_day")]
    pub start: NaiveTime,
    #[serde(with = "human_duration")]
    pub duration: std::time::Duration,
    pub frequency: Frequency,
    #[serde(default)]
    pub days: Vec<Weekday>,
    #[serde(default = "default_category")]
    pub category: ScheduleCategory,
}

impl RecurringTask {
    pub fn duration_chrono(&self) -> Duration {
        Duration::seconds(self.duration.as_secs() as i64)
    }
}

fn new_task_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_category() -> ScheduleCategory {
    ScheduleCategory::Other
}

/// Everything the user configures about how their calendar gets planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    #[serde(default)]
    pub work_hours: Option<WorkHours>,
    #[serde(default)]
    pub recurring_tasks: Vec<RecurringTask>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            calendar_name: default_calendar_name(),
            export_dir: None,
            work_hours: None,
            recurring_tasks: Vec::new(),
        }
    }
}

fn default_calendar_name() -> String {
    "icalplan".to_string()
}

/// `"%H:%M"` wire format for times of day, with a seconds-bearing fallback.
mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// Durations as humans write them: `"1h"`, `"45m"`, `"1h 30m"`.
mod human_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&humantime::format_duration(*duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}
