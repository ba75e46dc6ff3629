//! Filter for the requested release-year window.
//!
//! Candidates whose year cannot be resolved are dropped: a year filter
//! cannot pass unknown data.

use crate::criteria::FilterCriteria;
use crate::traits::Filter;
use sources::Candidate;

/// Keeps candidates released inside `criteria.year_range`.
///
/// ## Algorithm
/// 1. Resolve the year from `release_date`, falling back to `first_air_date`
/// 2. Drop the candidate if neither holds a parseable year
/// 3. Keep it if `min <= year <= max`
pub struct YearRangeFilter;

impl Filter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, criteria: &FilterCriteria) -> Vec<Candidate> {
        if criteria.year_range.is_inverted() {
            return Vec::new();
        }

        candidates
            .into_iter()
            .filter(|candidate| match candidate.entity.year() {
                Some(year) => criteria.year_range.contains(year),
                None => false,
            })
            .collect()
    }
}
