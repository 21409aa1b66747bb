//! Planning horizon.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::constants::DEFAULT_PLAN_DAYS;
use crate::error::{PlanError, PlanResult};

/// The window of time a planning pass operates on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Default for DateRange {
    fn default() -> Self {
        let now = Utc::now();
        DateRange {
            from: now,
            to: now + Duration::days(DEFAULT_PLAN_DAYS),
        }
    }
}

impl DateRange {
    /// Build a range from optional `YYYY-MM-DD` command-line arguments.
    ///
    /// A given `from` starts at midnight, a given `to` runs to the end of
    /// that day. Missing bounds fall back to now and now plus the default
    /// horizon respectively.
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> PlanResult<Self> {
        let from = match from {
            Some(raw) => start_of_day(parse_day(raw)?),
            None => Utc::now(),
        };
        let to = match to {
            Some(raw) => end_of_day(parse_day(raw)?),
            None => from + Duration::days(DEFAULT_PLAN_DAYS),
        };
        Ok(DateRange { from, to })
    }

    /// The smallest whole-day range covering `[start, end]`.
    pub fn covering(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        DateRange {
            from: start_of_day(start.date_naive()),
            to: end_of_day(end.date_naive()),
        }
    }

    /// Every calendar day the range touches, in order. An inverted range
    /// yields nothing.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.from.date_naive();
        let last = self.to.date_naive();
        std::iter::successors((first <= last).then_some(first), move |day| {
            day.succ_opt().filter(|next| *next <= last)
        })
    }
}

fn parse_day(raw: &str) -> PlanResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| PlanError::Config(format!("Invalid date '{raw}', expected YYYY-MM-DD")))
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(23, 59, 59).unwrap().and_utc()
}
