//! Error types for the catalog crate.
//!
//! Two families of failure live here:
//! - `CatalogError` for calls to the external catalog (transport, status, decoding)
//! - `HistoryError` for watch-history imports (files and CSV rows)
//!
//! A catalog failure is always an `Err`, never an empty result, so callers can
//! tell "nothing found" apart from "could not ask".

use thiserror::Error;

/// Errors returned by a `CatalogClient`.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The request never produced a response (DNS, connect, timeout, TLS)
    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The catalog answered with a non-success status
    ///
    /// The body is kept verbatim so the failure detail survives to the logs.
    #[error("Catalog returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape
    #[error("Invalid catalog response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}

/// Errors that can occur while importing a watch history.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// I/O error occurred while reading an export file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row was readable but one of its fields was not
    #[error("Parse error at row {row}: {reason}")]
    ParseError { row: usize, reason: String },
}

/// Convenience alias for catalog calls.
pub type Result<T> = std::result::Result<T, CatalogError>;
