//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use crate::criteria::FilterCriteria;
use sources::Candidate;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - Filters are pure: no I/O, and unknown data is dropped rather than
///   reported as an error
/// - Filters take ownership of the Vec<Candidate> and return a filtered Vec,
///   keeping the relative order of survivors
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `criteria` - Constraints for the current request
    fn apply(&self, candidates: Vec<Candidate>, criteria: &FilterCriteria) -> Vec<Candidate>;
}
