//! Filtering and ranking of recommendation candidates.
//!
//! This crate provides:
//! - FilterCriteria, built once per request
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Ranker for deduplicating, sorting and capping the survivors
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Filters remove unwanted candidates (wrong years, low rating, wrong genre)
//! 2. Ranker drops duplicate ids, sorts by vote average and caps the list
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterCriteria, FilterPipeline, Ranker};
//!
//! let criteria = FilterCriteria::new(1990, 2023, 8.0, ["Drama"])?;
//! let pipeline = FilterPipeline::standard(genres.clone());
//!
//! let filtered = pipeline.apply(expansion.candidates, &criteria);
//! let ranked = Ranker::default().finalize(filtered);
//! ```

pub mod criteria;
pub mod filter_pipeline;
pub mod filters;
pub mod ranking;
pub mod traits;

// Re-export main types
pub use criteria::{CriteriaError, FilterCriteria, YearRange};
pub use filter_pipeline::FilterPipeline;
pub use ranking::{DEFAULT_RESULT_CAP, RankedResult, Ranker};
pub use traits::Filter;
