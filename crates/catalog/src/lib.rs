//! # Catalog Crate
//!
//! Everything the rest of the workspace knows about the outside movie/show
//! catalog and about a user's watch history.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CatalogEntity, WatchedItem, MediaKind)
//! - **genres**: The shared, immutable genre id → name table
//! - **client**: The `CatalogClient` contract and the TMDB implementation
//! - **history**: Watch-history importers (manual list, Letterboxd CSV)
//! - **error**: Error types for catalog calls and imports
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogClient, GenreTable, MediaKind, TmdbClient};
//! use std::time::Duration;
//!
//! let client = TmdbClient::new(token, "https://api.themoviedb.org/3", Duration::from_secs(30))?;
//! let hits = client.search_title("Heat", MediaKind::Movie).await?;
//!
//! let genres = GenreTable::standard();
//! println!("{:?}", genres.names(&hits[0].genre_ids));
//! ```

// Public modules
pub mod client;
pub mod error;
pub mod genres;
pub mod history;
pub mod types;

// Re-export commonly used types for convenience
pub use client::{CatalogClient, TmdbClient};
pub use error::{CatalogError, HistoryError, Result};
pub use genres::GenreTable;
pub use history::{
    HistoryStats, load_letterboxd_csv, parse_title_list, read_letterboxd_csv, sample_top_rated,
};
pub use types::{
    // Type aliases
    CatalogId,
    SeedTitle,
    // Core types
    CatalogDetails,
    CatalogEntity,
    MediaKind,
    WatchedItem,
    format_runtime,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_query_order() {
        assert_eq!(MediaKind::ALL, [MediaKind::Movie, MediaKind::Show]);
        assert_eq!(MediaKind::Show.path_segment(), "tv");
        assert_eq!(MediaKind::Show.to_string(), "show");
    }

    #[test]
    fn test_manual_history_feeds_sampling() {
        let history = parse_title_list("Heat, Alien, Ran");
        let sampled = sample_top_rated(&history, 50);
        assert_eq!(sampled.len(), 3);
        assert_eq!(sampled[0].title, "Heat");
    }
}
