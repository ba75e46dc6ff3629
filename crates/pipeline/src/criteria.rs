//! Filter criteria for a single recommendation request.
//!
//! Built once per request and never mutated afterwards.

use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while building criteria.
#[derive(Error, Debug, PartialEq)]
pub enum CriteriaError {
    #[error("Year range is inverted: {min} > {max}")]
    InvertedYearRange { min: i32, max: i32 },

    #[error("Minimum rating {0} is outside 0-10")]
    RatingOutOfRange(f32),
}

/// Inclusive year bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }

    /// An inverted range admits nothing.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// Year, rating and genre constraints applied to candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub year_range: YearRange,
    /// Minimum `vote_average` (0-10)
    pub min_rating: f32,
    /// Accepted genre names; empty means no genre restriction
    pub allowed_genres: BTreeSet<String>,
}

impl FilterCriteria {
    /// Validated constructor.
    ///
    /// # Arguments
    /// * `min_year`, `max_year` - Inclusive release year bounds
    /// * `min_rating` - Minimum average vote (0-10)
    /// * `allowed_genres` - Genre names, any one of which qualifies
    pub fn new<I, S>(
        min_year: i32,
        max_year: i32,
        min_rating: f32,
        allowed_genres: I,
    ) -> Result<Self, CriteriaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if min_year > max_year {
            return Err(CriteriaError::InvertedYearRange {
                min: min_year,
                max: max_year,
            });
        }
        if !(0.0..=10.0).contains(&min_rating) {
            return Err(CriteriaError::RatingOutOfRange(min_rating));
        }

        Ok(Self {
            year_range: YearRange {
                min: min_year,
                max: max_year,
            },
            min_rating,
            allowed_genres: allowed_genres.into_iter().map(Into::into).collect(),
        })
    }

    pub fn has_genre_restriction(&self) -> bool {
        !self.allowed_genres.is_empty()
    }
}
