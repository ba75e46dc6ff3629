//! Filter to ensure minimum quality threshold.
//!
//! Removes titles whose catalog vote average is below the requested floor.

use crate::criteria::FilterCriteria;
use crate::traits::Filter;
use sources::Candidate;

/// Removes candidates below `criteria.min_rating`.
pub struct MinimumRatingFilter;

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, criteria: &FilterCriteria) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.vote_average() >= criteria.min_rating)
            .collect()
    }
}
