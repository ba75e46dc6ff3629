//! Shared genre id → name table.
//!
//! The catalog uses two overlapping taxonomies, one for movies and one for
//! shows. Both are merged into a single read-only table that is built once
//! and shared through an `Arc`; nothing mutates it afterwards.

use std::collections::{BTreeSet, HashMap};

const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Sci-Fi"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

const SHOW_GENRES: &[(u32, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

/// Immutable genre lookup covering both movie and show ids.
#[derive(Debug, Clone)]
pub struct GenreTable {
    names: HashMap<u32, &'static str>,
}

impl GenreTable {
    /// The catalog's standard movie + show taxonomy.
    ///
    /// Ids present in both lists map to the same name, so merge order only
    /// matters for ids that disagree (show names win).
    pub fn standard() -> Self {
        let names = MOVIE_GENRES
            .iter()
            .chain(SHOW_GENRES.iter())
            .copied()
            .collect();
        Self { names }
    }

    /// Build a table from explicit pairs.
    pub fn from_pairs(pairs: &[(u32, &'static str)]) -> Self {
        Self {
            names: pairs.iter().copied().collect(),
        }
    }

    /// Name for a genre id
    pub fn name(&self, id: u32) -> Option<&'static str> {
        self.names.get(&id).copied()
    }

    /// Names for a list of ids, skipping ids the table does not know.
    pub fn names(&self, ids: &[u32]) -> Vec<&'static str> {
        ids.iter().filter_map(|id| self.name(*id)).collect()
    }

    /// Every distinct genre name, sorted.
    pub fn all_names(&self) -> Vec<&'static str> {
        self.names
            .values()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Table spelling of a user-supplied genre name (case-insensitive).
    pub fn canonical(&self, name: &str) -> Option<&'static str> {
        let wanted = name.trim();
        self.names
            .values()
            .copied()
            .find(|known| known.eq_ignore_ascii_case(wanted))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for GenreTable {
    fn default() -> Self {
        Self::standard()
    }
}
