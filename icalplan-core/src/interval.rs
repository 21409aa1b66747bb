//! Half-open interval arithmetic.

use chrono::{DateTime, Utc};

/// Whether `[a_start, a_end)` and `[b_start, b_end)` share any instant.
///
/// Intervals that merely touch (one ends exactly when the other starts)
/// do not overlap, so back-to-back events are fine.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, hour, min, 0).unwrap()
    }

    #[test]
    fn test_partial_overlap() {
        assert!(intervals_overlap(at(9, 0), at(11, 0), at(10, 0), at(12, 0)));
        assert!(intervals_overlap(at(10, 0), at(12, 0), at(9, 0), at(11, 0)));
    }

    #[test]
    fn test_containment_overlaps() {
        assert!(intervals_overlap(at(9, 0), at(17, 0), at(12, 0), at(13, 0)));
        assert!(intervals_overlap(at(12, 0), at(13, 0), at(9, 0), at(17, 0)));
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        assert!(!intervals_overlap(at(9, 0), at(10, 0), at(10, 0), at(11, 0)));
        assert!(!intervals_overlap(at(10, 0), at(11, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn test_disjoint() {
        assert!(!intervals_overlap(at(9, 0), at(10, 0), at(14, 0), at(15, 0)));
    }
}
