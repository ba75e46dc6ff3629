//! Filter to keep only titles matching the requested genres.

use crate::criteria::FilterCriteria;
use crate::traits::Filter;
use catalog::GenreTable;
use sources::Candidate;
use std::sync::Arc;

/// Keeps candidates sharing at least one genre with `criteria.allowed_genres`.
///
/// ## Algorithm
/// 1. Empty `allowed_genres` → keep everything
/// 2. Resolve each candidate's genre ids through the shared table
/// 3. Keep the candidate if any resolved name is allowed (OR, case-insensitive)
///
/// Ids missing from the table resolve to nothing and never match.
pub struct GenreFilter {
    genres: Arc<GenreTable>,
}

impl GenreFilter {
    /// Create a new GenreFilter.
    ///
    /// # Arguments
    /// * `genres` - Shared genre table used to resolve ids
    pub fn new(genres: Arc<GenreTable>) -> Self {
        Self { genres }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, criteria: &FilterCriteria) -> Vec<Candidate> {
        if !criteria.has_genre_restriction() {
            return candidates;
        }

        candidates
            .into_iter()
            .filter(|candidate| {
                self.genres
                    .names(&candidate.entity.genre_ids)
                    .iter()
                    .any(|name| {
                        criteria
                            .allowed_genres
                            .iter()
                            .any(|allowed| allowed.eq_ignore_ascii_case(name))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogEntity, MediaKind};

    fn candidate(id: u64, genre_ids: Vec<u32>) -> Candidate {
        Candidate::new(
            CatalogEntity::new(id, format!("Title {}", id), 7.0).with_genres(genre_ids),
            MediaKind::Movie,
            "seed",
        )
    }

    fn candidates() -> Vec<Candidate> {
        vec![
            candidate(1, vec![28, 12]),    // Action/Adventure
            candidate(2, vec![18]),        // Drama
            candidate(3, vec![878]),       // Sci-Fi
            candidate(4, vec![999_999]),   // unknown id
            candidate(5, vec![]),          // no genres
        ]
    }

    #[test]
    fn test_genre_filter_uses_or_semantics() {
        let filter = GenreFilter::new(Arc::new(GenreTable::standard()));
        let criteria = FilterCriteria::new(1900, 2100, 0.0, ["Action", "drama"]).unwrap();

        let filtered = filter.apply(candidates(), &criteria);

        let ids: Vec<_> = filtered.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_empty_genre_set_keeps_everything() {
        let filter = GenreFilter::new(Arc::new(GenreTable::standard()));
        let criteria = FilterCriteria::new(1900, 2100, 0.0, Vec::<String>::new()).unwrap();

        assert_eq!(filter.apply(candidates(), &criteria).len(), 5);
    }

    #[test]
    fn test_unknown_ids_never_match() {
        let filter = GenreFilter::new(Arc::new(GenreTable::from_pairs(&[(18, "Drama")])));
        let criteria = FilterCriteria::new(1900, 2100, 0.0, ["Action"]).unwrap();

        assert!(filter.apply(candidates(), &criteria).is_empty());
    }
}
