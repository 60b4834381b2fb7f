//! Error types for deck_builder
//!
//! Only I/O-boundary failures surface as `Err`. Row-level and card-level
//! problems are recorded as [`crate::models::ValidationIssue`]s instead.

use mtg_common::ScryfallError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems reading the input CSV
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("Failed to read CSV file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV must include a '{0}' column")]
    MissingColumn(&'static str),
    #[error("No card rows found in CSV")]
    Empty,
}

/// Card lookup failures, recorded per request
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Card could not be found on Scryfall: {request}")]
    NotFound { request: String },
    #[error("Ambiguous match on Scryfall for {request}: {details}")]
    Ambiguous { request: String, details: String },
    #[error("Scryfall unavailable while resolving {request}: {source}")]
    Unavailable {
        request: String,
        #[source]
        source: ScryfallError,
    },
}

/// Failures writing the export files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{} output file(s) could not be written: {}", .0.len(), join_errors(.0))]
    Partial(Vec<OutputError>),
}

fn join_errors(errors: &[OutputError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unrecoverable errors that abort the run
#[derive(Debug, Error)]
pub enum DeckError {
    #[error(transparent)]
    Csv(#[from] CsvError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("Failed to create Scryfall client: {0}")]
    Client(#[from] ScryfallError),
}

/// Result alias for deck_builder operations
pub type Result<T> = std::result::Result<T, DeckError>;
