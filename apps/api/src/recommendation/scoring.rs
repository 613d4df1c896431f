//! Pure scoring functions for the recommendation engine.
//!
//! Kept free of store and HTTP concerns so the ranking arithmetic is
//! testable on its own and shared between the scored path and its tests.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

pub const MS_PER_DAY: f64 = (1000 * 60 * 60 * 24) as f64;

/// Number of distinct tags that also appear in the user's interests
/// (set-intersection cardinality; duplicates on the listing count once).
pub fn interest_score(tags: &[String], interests: &HashSet<String>) -> u32 {
    if interests.is_empty() {
        return 0;
    }
    tags.iter()
        .filter(|tag| interests.contains(tag.as_str()))
        .collect::<HashSet<_>>()
        .len() as u32
}

/// Application deadline expressed on a day scale: epoch milliseconds
/// divided by the milliseconds in a day. Missing deadline scores 0.
///
/// TODO: confirm whether this should be days-until-deadline; as written it
/// is the deadline's absolute epoch-day value, so later deadlines outrank
/// nearer ones.
pub fn recency_score(deadline: Option<DateTime<Utc>>) -> f64 {
    deadline
        .map(|d| d.timestamp_millis() as f64 / MS_PER_DAY)
        .unwrap_or(0.0)
}

/// Interest overlap plus the recency term damped by 1000.
pub fn total_score(interest: u32, recency: f64) -> f64 {
    f64::from(interest) + recency / 1000.0
}
