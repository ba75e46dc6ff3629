//! Core domain types shared by every crate in the workspace.
//!
//! - `CatalogEntity` is deserialized straight from the catalog's JSON and is
//!   treated as read-only afterwards.
//! - `WatchedItem` is what a history import produces.
//! - `MediaKind` selects between the movie and show halves of the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Catalog-assigned identifier. Stable, and the dedup key for ranking.
pub type CatalogId = u64;

/// Free-text title used to bootstrap candidate discovery.
///
/// Not validated against the catalog until it is queried.
pub type SeedTitle = String;

// =============================================================================
// Media kinds
// =============================================================================

/// Which half of the catalog a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
}

impl MediaKind {
    /// Query order used for every seed: movies first, then shows.
    pub const ALL: [MediaKind; 2] = [MediaKind::Movie, MediaKind::Show];

    /// Path segment the catalog uses for this kind
    pub fn path_segment(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Show => write!(f, "show"),
        }
    }
}

// =============================================================================
// Catalog records
// =============================================================================

/// A movie or show as returned by search, similar and popular lists.
///
/// Movies carry `title`/`release_date`, shows carry `name`/`first_air_date`.
/// Both date fields are kept so the year can be resolved in a fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntity {
    pub id: CatalogId,
    #[serde(alias = "name", default)]
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Average vote on a 0-10 scale
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl CatalogEntity {
    /// Minimal entity, mostly useful for fixtures.
    pub fn new(id: CatalogId, title: impl Into<String>, vote_average: f32) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: None,
            first_air_date: None,
            vote_average,
            genre_ids: Vec::new(),
            poster_path: None,
            overview: None,
        }
    }

    /// Set the movie-style release date (builder style).
    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    /// Set the show-style first air date (builder style).
    pub fn with_first_air_date(mut self, date: impl Into<String>) -> Self {
        self.first_air_date = Some(date.into());
        self
    }

    /// Set the genre ids (builder style).
    pub fn with_genres(mut self, genre_ids: Vec<u32>) -> Self {
        self.genre_ids = genre_ids;
        self
    }

    /// Raw date used for the year: `release_date` first, then `first_air_date`.
    ///
    /// Empty strings count as missing.
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| {
                self.first_air_date
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
            })
    }

    /// Release year, or `None` when the date is missing or malformed.
    pub fn year(&self) -> Option<i32> {
        self.date().and_then(parse_year)
    }

    /// Full poster URL for display.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|p| format!("https://image.tmdb.org/t/p/w500{}", p))
    }
}

/// Extract the year from an ISO-like date ("1999-03-31", "1999").
fn parse_year(date: &str) -> Option<i32> {
    let head = date.split('-').next()?.trim();
    if head.len() != 4 {
        return None;
    }
    head.parse().ok()
}

/// Detail record for a single title.
///
/// Details name their genres directly and carry a runtime, which the list
/// endpoints do not.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDetails {
    pub entity: CatalogEntity,
    /// Runtime in minutes (episode runtime for shows)
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub tagline: Option<String>,
}

impl CatalogDetails {
    /// Runtime rendered as "2h 15m".
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime.filter(|m| *m > 0).map(format_runtime)
    }
}

/// Format minutes as hours and minutes.
pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

// =============================================================================
// Watch history
// =============================================================================

/// One entry of an imported watch history.
///
/// Immutable once created; lives for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedItem {
    pub title: String,
    pub year: Option<i32>,
    /// User rating on a 0-5 scale
    pub rating: Option<f32>,
    /// May be empty until the item is enriched from the catalog
    pub genres: Vec<String>,
}

impl WatchedItem {
    /// A bare title with no year, rating or genres (manual entry).
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            rating: None,
            genres: Vec::new(),
        }
    }

    /// Set the rating (builder style).
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the year (builder style).
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}
