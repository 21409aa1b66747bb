//! Shared constants.

/// Default planning horizon in days when no range is given.
pub const DEFAULT_PLAN_DAYS: i64 = 14;
