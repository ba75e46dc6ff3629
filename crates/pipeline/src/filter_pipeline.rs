//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::criteria::FilterCriteria;
use crate::filters::{GenreFilter, MinimumRatingFilter, YearRangeFilter};
use crate::traits::Filter;
use catalog::GenreTable;
use sources::Candidate;
use std::sync::Arc;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(YearRangeFilter)
///     .add_filter(MinimumRatingFilter)
///     .add_filter(GenreFilter::new(genres.clone()));
///
/// let filtered = pipeline.apply(candidates, &criteria);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The three request filters in their usual order: year, rating, genre.
    ///
    /// Each filter is an independent predicate, so the order only affects
    /// how many candidates each later stage sees.
    pub fn standard(genres: Arc<GenreTable>) -> Self {
        Self::new()
            .add_filter(YearRangeFilter)
            .add_filter(MinimumRatingFilter)
            .add_filter(GenreFilter::new(genres))
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with the input candidates
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter
    /// * `criteria` - Request constraints shared by every filter
    pub fn apply(&self, candidates: Vec<Candidate>, criteria: &FilterCriteria) -> Vec<Candidate> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, criteria);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogEntity, MediaKind};

    fn candidate(id: u64, date: &str, vote: f32, genres: Vec<u32>) -> Candidate {
        Candidate::new(
            CatalogEntity::new(id, format!("Title {}", id), vote)
                .with_release_date(date)
                .with_genres(genres),
            MediaKind::Movie,
            "seed",
        )
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let criteria = FilterCriteria::new(1900, 2100, 0.0, Vec::<String>::new()).unwrap();

        let candidates = vec![
            candidate(1, "2001-01-01", 9.0, vec![]),
            candidate(2, "2002-01-01", 8.0, vec![]),
        ];

        let filtered = pipeline.apply(candidates, &criteria);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_single_filter() {
        let pipeline = FilterPipeline::new().add_filter(MinimumRatingFilter);
        let criteria = FilterCriteria::new(1900, 2100, 7.0, Vec::<String>::new()).unwrap();

        let candidates = vec![
            candidate(1, "2001-01-01", 6.9, vec![]),
            candidate(2, "2002-01-01", 8.0, vec![]),
        ];

        let filtered = pipeline.apply(candidates, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id(), 2);
    }

    #[test]
    fn test_standard_pipeline_chains_all_filters() {
        let pipeline = FilterPipeline::standard(Arc::new(GenreTable::standard()));
        assert_eq!(pipeline.len(), 3);

        let criteria = FilterCriteria::new(1990, 2023, 8.0, ["Drama"]).unwrap();
        let candidates = vec![
            candidate(1, "1985-01-01", 9.0, vec![18]), // too old
            candidate(2, "2005-01-01", 7.5, vec![18]), // low rating
            candidate(3, "2005-01-01", 8.5, vec![35]), // comedy
            candidate(4, "2010-06-01", 8.4, vec![18, 80]),
        ];

        let filtered = pipeline.apply(candidates, &criteria);
        let ids: Vec<_> = filtered.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![4]);
    }
}
