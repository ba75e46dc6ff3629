//! # Sources Crate
//!
//! Candidate generation for recommendations.
//!
//! ## Components
//!
//! ### Candidate Aggregator
//! Seed-based discovery through the catalog:
//! - "Titles similar to the ones you like"
//! - Each seed is matched once per media kind, then expanded through the
//!   catalog's similar list
//! - Failures are contained per seed and reported alongside the results
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::CandidateAggregator;
//! use std::sync::Arc;
//!
//! let aggregator = CandidateAggregator::new(Arc::new(tmdb_client));
//! let expansion = aggregator.expand(&["Heat", "Alien"]).await;
//!
//! for failure in &expansion.failures {
//!     eprintln!("warning: {}", failure);
//! }
//! ```

// Public modules
pub mod aggregator;
pub mod types;

// Re-export commonly used types
pub use aggregator::{CandidateAggregator, seeds_from_history};
pub use types::{Candidate, Expansion, SeedFailure};

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogEntity, MediaKind};

    #[test]
    fn test_candidate_creation() {
        let candidate = Candidate::new(CatalogEntity::new(7, "Se7en", 8.4), MediaKind::Movie, "Zodiac");
        assert_eq!(candidate.id(), 7);
        assert_eq!(candidate.vote_average(), 8.4);
        assert_eq!(candidate.kind, MediaKind::Movie);
        assert_eq!(candidate.seed, "Zodiac");
    }

    #[test]
    fn test_empty_expansion_is_not_partial() {
        let expansion = Expansion::default();
        assert!(expansion.candidates.is_empty());
        assert!(!expansion.is_partial());
    }
}
