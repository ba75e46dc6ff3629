//! Final ordering of filtered candidates.
//!
//! ## Algorithm
//! 1. Deduplicate by catalog id, keeping the first occurrence
//! 2. Stable sort by `vote_average`, highest first
//! 3. Truncate to the result cap
//!
//! Dedup runs before the sort, so when the same id arrives from two seeds
//! the copy from the earlier seed wins, whatever its vote.

use sources::Candidate;
use std::collections::HashSet;
use std::ops::Deref;

/// Number of results kept when no cap is given.
pub const DEFAULT_RESULT_CAP: usize = 6;

/// Ranked, deduplicated and capped recommendations.
///
/// Only [`Ranker::finalize`] builds one, so every value satisfies
/// unique ids, descending votes and `len() <= cap`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResult(Vec<Candidate>);

impl RankedResult {
    pub fn into_inner(self) -> Vec<Candidate> {
        self.0
    }
}

impl Deref for RankedResult {
    type Target = [Candidate];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for RankedResult {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Deduplicates, sorts and caps a filtered candidate list.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    cap: usize,
}

impl Ranker {
    /// # Arguments
    /// * `cap` - Maximum number of results returned
    pub fn new(cap: usize) -> Self {
        Self { cap }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Finalize a candidate list into a ranked result.
    ///
    /// Ties keep their incoming order. A NaN vote ranks below every real
    /// vote.
    pub fn finalize(&self, candidates: Vec<Candidate>) -> RankedResult {
        let input_count = candidates.len();

        let mut seen = HashSet::with_capacity(candidates.len());
        let mut unique: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.id()))
            .collect();

        unique.sort_by(|a, b| rank_key(b).total_cmp(&rank_key(a)));
        unique.truncate(self.cap);

        tracing::debug!(
            "Ranked {} candidates into {} results (cap {})",
            input_count,
            unique.len(),
            self.cap
        );

        RankedResult(unique)
    }
}

/// Sort key with NaN mapped below every finite vote.
fn rank_key(candidate: &Candidate) -> f32 {
    let vote = candidate.vote_average();
    if vote.is_nan() { f32::NEG_INFINITY } else { vote }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_CAP)
    }
}
