//! Candidate Aggregator - seed expansion through the catalog
//!
//! Turns a list of seed titles into raw candidates:
//! "Titles similar to the ones you typed"
//!
//! ## Algorithm
//! 1. For each seed, in input order:
//!    - search movies, then shows
//!    - take the first hit of each kind as the canonical match
//!    - append that match's "similar" list, tagged with the seed
//! 2. A seed with no hits contributes nothing
//! 3. A catalog failure drops that seed's contribution, is logged, and
//!    processing moves on to the next seed
//!
//! Calls are awaited one at a time. The fixed seed/kind order is what gives
//! the ranker a deterministic tie order.

use crate::types::{Candidate, Expansion, SeedFailure};
use catalog::{CatalogClient, MediaKind, WatchedItem, sample_top_rated};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Expands seed titles into similar-title candidates.
#[derive(Clone)]
pub struct CandidateAggregator {
    /// Shared catalog client (read-only)
    client: Arc<dyn CatalogClient>,
}

impl CandidateAggregator {
    /// Create a new aggregator
    ///
    /// ## Parameters
    /// - `client`: Catalog used for search and similar lookups
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Expand every seed into raw candidates.
    #[instrument(skip(self, seeds), fields(seed_count = seeds.len(), catalog = self.client.name()))]
    pub async fn expand<S: AsRef<str>>(&self, seeds: &[S]) -> Expansion {
        let mut expansion = Expansion::default();

        for seed in seeds {
            let seed = seed.as_ref().trim();
            if seed.is_empty() {
                continue;
            }

            match self.expand_seed(seed).await {
                Ok(candidates) => {
                    debug!("Seed '{}' contributed {} candidates", seed, candidates.len());
                    expansion.candidates.extend(candidates);
                }
                Err(failure) => {
                    warn!(
                        seed = %failure.seed,
                        kind = %failure.kind,
                        error = %failure.error,
                        "Catalog lookup failed, seed contributes no candidates"
                    );
                    expansion.failures.push(failure);
                }
            }
        }

        debug!(
            "Expanded into {} raw candidates ({} seeds failed)",
            expansion.candidates.len(),
            expansion.failures.len()
        );
        expansion
    }

    /// Candidates for a single seed, or the first failure hit while collecting them.
    async fn expand_seed(&self, seed: &str) -> Result<Vec<Candidate>, SeedFailure> {
        let mut candidates = Vec::new();

        for kind in MediaKind::ALL {
            let fail = |error| SeedFailure {
                seed: seed.to_string(),
                kind,
                error,
            };

            let hits = self.client.search_title(seed, kind).await.map_err(fail)?;

            // First hit is canonical; ambiguous titles are not disambiguated
            let Some(canonical) = hits.into_iter().next() else {
                debug!("No {} match for '{}'", kind, seed);
                continue;
            };

            let similar = self
                .client
                .similar_to(canonical.id, kind)
                .await
                .map_err(fail)?;

            candidates.extend(
                similar
                    .into_iter()
                    .map(|entity| Candidate::new(entity, kind, seed)),
            );
        }

        Ok(candidates)
    }
}

/// Seeds derived from a watch history: the `max` best-rated titles.
pub fn seeds_from_history(history: &[WatchedItem], max: usize) -> Vec<String> {
    sample_top_rated(history, max)
        .into_iter()
        .map(|item| item.title)
        .collect()
}
