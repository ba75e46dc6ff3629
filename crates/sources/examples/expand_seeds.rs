//! Example: Expand seed titles into raw candidates
//!
//! Run with:
//!   TMDB_ACCESS_TOKEN=... cargo run --package sources --example expand_seeds -- "Heat" "Dark"
//!
//! This example shows how to:
//! 1. Build a TMDB catalog client
//! 2. Expand each seed (first movie hit, then first show hit)
//! 3. Display the raw candidates and any failed seeds

use anyhow::Context;
use catalog::TmdbClient;
use sources::CandidateAggregator;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("=== Candidate Expansion Example ===\n");

    let token = std::env::var("TMDB_ACCESS_TOKEN").context("TMDB_ACCESS_TOKEN is not set")?;
    let client = TmdbClient::new(token, "https://api.themoviedb.org/3", Duration::from_secs(30))?;
    let aggregator = CandidateAggregator::new(Arc::new(client));

    let mut seeds: Vec<String> = std::env::args().skip(1).collect();
    if seeds.is_empty() {
        seeds = vec!["The Matrix".to_string(), "Breaking Bad".to_string()];
    }
    println!("Seeds: {}\n", seeds.join(", "));

    let start = Instant::now();
    let expansion = aggregator.expand(&seeds).await;
    println!("Expanded in {:?}", start.elapsed());

    let unique: HashSet<_> = expansion.candidates.iter().map(|c| c.id()).collect();
    println!(
        "  Candidates: {} ({} unique ids)",
        expansion.candidates.len(),
        unique.len()
    );
    println!("  Failed seeds: {}\n", expansion.failures.len());

    for failure in &expansion.failures {
        println!("  ! {}", failure);
    }

    println!("First 10 candidates:");
    for candidate in expansion.candidates.iter().take(10) {
        println!(
            "  {} [{}] {:.1} <- {}",
            candidate.entity.title,
            candidate.kind,
            candidate.vote_average(),
            candidate.seed
        );
    }

    Ok(())
}
