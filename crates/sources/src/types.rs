//! Candidate and expansion result types.

use catalog::{CatalogEntity, CatalogError, CatalogId, MediaKind};
use std::fmt;

/// A catalog entity proposed as a recommendation, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub entity: CatalogEntity,
    /// Kind of the similar list that produced this entity
    pub kind: MediaKind,
    /// Seed title whose expansion produced this entity
    pub seed: String,
}

impl Candidate {
    pub fn new(entity: CatalogEntity, kind: MediaKind, seed: impl Into<String>) -> Self {
        Self {
            entity,
            kind,
            seed: seed.into(),
        }
    }

    /// Dedup key
    pub fn id(&self) -> CatalogId {
        self.entity.id
    }

    /// Ranking score (0-10)
    pub fn vote_average(&self) -> f32 {
        self.entity.vote_average
    }
}

/// Why a seed contributed nothing.
#[derive(Debug)]
pub struct SeedFailure {
    pub seed: String,
    /// The query kind that was in flight when the catalog failed
    pub kind: MediaKind,
    pub error: CatalogError,
}

impl fmt::Display for SeedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seed '{}' skipped ({} lookup failed: {})",
            self.seed, self.kind, self.error
        )
    }
}

/// Output of a candidate expansion.
///
/// `candidates` are raw: duplicates included, unranked, in discovery order.
/// `failures` lists the seeds that were dropped because the catalog failed.
#[derive(Debug, Default)]
pub struct Expansion {
    pub candidates: Vec<Candidate>,
    pub failures: Vec<SeedFailure>,
}

impl Expansion {
    /// True when at least one seed was dropped.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}
