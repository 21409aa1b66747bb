//! Conflict-free merging of candidate events.
//!
//! Candidates come from a draft generator or manual entry. The resolver
//! validates each one, then walks them earliest-start-first, accepting a
//! candidate only if it clears everything already scheduled and every
//! fixed commitment. Losers are reported, never silently dropped.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::constraints::Constraints;
use crate::date_range::DateRange;
use crate::event::CalendarEvent;
use crate::interval::intervals_overlap;
use crate::store::EventStore;

/// Why a candidate did not make it onto the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("overlaps an already scheduled event")]
    Overlap,

    #[error("collides with work hours or a recurring commitment")]
    FixedCommitmentConflict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is empty")]
    EmptyTitle,

    #[error("event ends before it starts")]
    InvertedInterval,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedCandidate {
    pub candidate: CalendarEvent,
    pub reason: RejectReason,
}

/// Outcome of a [`resolve`] pass. Accepted events are ready to be added
/// to the store; rejected ones carry the reason for the report.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub accepted: Vec<CalendarEvent>,
    pub rejected: Vec<RejectedCandidate>,
}

/// Merge `candidates` against the current `store` and `constraints`.
///
/// Candidates are considered in start order (ties keep input order), so
/// when two candidates want the same slot the earlier-starting one wins
/// deterministically. All-day candidates skip the collision checks since
/// they do not occupy a time span.
pub fn resolve(
    candidates: Vec<CalendarEvent>,
    store: &EventStore,
    constraints: &Constraints,
    range: &DateRange,
) -> Resolution {
    let mut resolution = Resolution::default();

    let mut valid = Vec::new();
    for candidate in candidates {
        match validate(&candidate) {
            Ok(()) => valid.push(candidate),
            Err(error) => resolution.rejected.push(RejectedCandidate {
                candidate,
                reason: RejectReason::Validation(error),
            }),
        }
    }
    valid.sort_by_key(|candidate| candidate.start);

    let mut taken: Vec<(DateTime<Utc>, DateTime<Utc>)> = store
        .iter()
        .filter(|event| event.blocks_time())
        .map(|event| (event.start, event.end))
        .collect();

    for candidate in valid {
        if !candidate.blocks_time() {
            resolution.accepted.push(candidate);
            continue;
        }
        let collides = taken
            .iter()
            .any(|(start, end)| intervals_overlap(candidate.start, candidate.end, *start, *end));
        if collides {
            resolution.rejected.push(RejectedCandidate {
                candidate,
                reason: RejectReason::Overlap,
            });
            continue;
        }
        if constraints.conflicts_with_fixed_commitments(candidate.start, candidate.end, range) {
            resolution.rejected.push(RejectedCandidate {
                candidate,
                reason: RejectReason::FixedCommitmentConflict,
            });
            continue;
        }
        taken.push((candidate.start, candidate.end));
        resolution.accepted.push(candidate);
    }

    resolution
}

fn validate(candidate: &CalendarEvent) -> Result<(), ValidationError> {
    if candidate.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if candidate.blocks_time() && candidate.end <= candidate.start {
        return Err(ValidationError::InvertedInterval);
    }
    Ok(())
}
