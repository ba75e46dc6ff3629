//! # Recommendation Orchestrator
//!
//! This module coordinates the recommendation pipeline:
//! 1. Expand seeds into candidates (one seed at a time, movie then show)
//! 2. Apply the year, rating and genre filters
//! 3. Deduplicate, rank by vote average and cap
//!
//! Seed failures never abort a request. They are returned next to the
//! results so the caller can show a warning.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use catalog::{CatalogClient, GenreTable};
use pipeline::{FilterCriteria, FilterPipeline, RankedResult, Ranker};
use sources::{CandidateAggregator, SeedFailure};

/// Outcome of one recommendation request.
#[derive(Debug)]
pub struct Recommendations {
    pub results: RankedResult,
    /// Seeds whose catalog lookups failed; they contributed nothing
    pub failures: Vec<SeedFailure>,
    /// Candidates produced by expansion, duplicates included
    pub candidate_count: usize,
    /// Candidates left after filtering
    pub filtered_count: usize,
}

impl Recommendations {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Runs expand, apply and finalize for a request.
pub struct RecommendationOrchestrator {
    aggregator: CandidateAggregator,
    filter_pipeline: FilterPipeline,
    ranker: Ranker,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator with all components initialized
    ///
    /// # Arguments
    /// * `client` - Catalog used for search and similar-title lookups
    /// * `genres` - Shared genre table for the genre filter
    /// * `result_cap` - Maximum number of results per request
    pub fn new(client: Arc<dyn CatalogClient>, genres: Arc<GenreTable>, result_cap: usize) -> Self {
        Self {
            aggregator: CandidateAggregator::new(client),
            filter_pipeline: FilterPipeline::standard(genres),
            ranker: Ranker::new(result_cap),
        }
    }

    /// Main entry point: recommendations for a list of seed titles.
    ///
    /// # Arguments
    /// * `seeds` - Titles the user likes, in priority order
    /// * `criteria` - Filters for this request
    pub async fn recommend<S: AsRef<str>>(
        &self,
        seeds: &[S],
        criteria: &FilterCriteria,
    ) -> Recommendations {
        // Start timing
        let start_time = Instant::now();

        let expansion = self.aggregator.expand(seeds).await;
        let candidate_count = expansion.candidates.len();
        info!(
            "Expanded {} seeds into {} candidates ({} seeds failed)",
            seeds.len(),
            candidate_count,
            expansion.failures.len()
        );

        let filtered = self.filter_pipeline.apply(expansion.candidates, criteria);
        let filtered_count = filtered.len();
        info!("Applied filters, candidates remaining: {}", filtered_count);

        let results = self.ranker.finalize(filtered);

        if !expansion.failures.is_empty() {
            warn!(
                "Returning partial results: {} of {} seeds failed",
                expansion.failures.len(),
                seeds.len()
            );
        }

        // Log total time
        info!(
            "Selected {} recommendations in {:.2?}",
            results.len(),
            start_time.elapsed()
        );

        Recommendations {
            results,
            failures: expansion.failures,
            candidate_count,
            filtered_count,
        }
    }
}
