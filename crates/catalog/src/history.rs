//! Watch-history import.
//!
//! Every importer produces the same thing: a `Vec<WatchedItem>`. Supported
//! inputs:
//! - a manual, comma-separated list of titles
//! - a Letterboxd CSV export (`Date,Name,Year,Letterboxd URI[,Rating]`)
//!
//! Rows are validated here; downstream code trusts the items it is given.

use crate::error::HistoryError;
use crate::types::WatchedItem;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Parse a manual "Heat, Alien, The Thing" list.
///
/// Titles are trimmed and blank entries dropped. No year, rating or genres.
pub fn parse_title_list(text: &str) -> Vec<WatchedItem> {
    text.split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(WatchedItem::titled)
        .collect()
}

/// One row of a Letterboxd export. `Rating` only exists in ratings.csv.
#[derive(Debug, Deserialize)]
struct LetterboxdRow {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Rating", default)]
    rating: Option<String>,
}

/// Read a Letterboxd CSV export from any reader.
///
/// ## Algorithm
/// 1. Deserialize each row by header name
/// 2. Skip rows without a title
/// 3. Parse year and rating when present (rating clamped to 0-5)
pub fn read_letterboxd_csv<R: Read>(reader: R) -> Result<Vec<WatchedItem>, HistoryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut items = Vec::new();
    for (idx, record) in csv_reader.deserialize::<LetterboxdRow>().enumerate() {
        // Header is row 1
        let row_no = idx + 2;
        let row = record?;

        let title = match row.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                debug!("Skipping row {} without a title", row_no);
                continue;
            }
        };

        let year = parse_optional(row.year.as_deref(), row_no, "Year")?;
        let rating: Option<f32> = parse_optional(row.rating.as_deref(), row_no, "Rating")?;

        items.push(WatchedItem {
            title,
            year,
            rating: rating.map(|r| r.clamp(0.0, 5.0)),
            genres: Vec::new(),
        });
    }

    debug!("Imported {} watched items", items.len());
    Ok(items)
}

/// Load a Letterboxd CSV export from disk.
pub fn load_letterboxd_csv(path: &Path) -> Result<Vec<WatchedItem>, HistoryError> {
    let file = File::open(path)?;
    read_letterboxd_csv(file)
}

fn parse_optional<T: std::str::FromStr>(
    value: Option<&str>,
    row: usize,
    field: &str,
) -> Result<Option<T>, HistoryError>
where
    T::Err: std::fmt::Display,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| HistoryError::ParseError {
                row,
                reason: format!("Invalid {} '{}': {}", field, raw, e),
            }),
    }
}

/// Keep the `max` best-rated items when the history is longer than `max`.
///
/// Missing ratings count as 0. The sort is stable, so equally rated items
/// keep their import order. A history of `max` items or fewer is returned
/// unchanged.
pub fn sample_top_rated(history: &[WatchedItem], max: usize) -> Vec<WatchedItem> {
    if history.len() <= max {
        return history.to_vec();
    }

    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| {
        let ra = a.rating.unwrap_or(0.0);
        let rb = b.rating.unwrap_or(0.0);
        rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
    });
    sorted.truncate(max);
    sorted
}

/// Summary numbers shown after an import.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryStats {
    pub total: usize,
    /// Average over all items, missing ratings counted as 0
    pub average_rating: f32,
}

impl HistoryStats {
    pub fn from_history(history: &[WatchedItem]) -> Self {
        let total = history.len();
        let average_rating = if total == 0 {
            0.0
        } else {
            history.iter().map(|w| w.rating.unwrap_or(0.0)).sum::<f32>() / total as f32
        };
        Self {
            total,
            average_rating,
        }
    }
}
