//! Error types for Scryfall operations

use thiserror::Error;

/// Unified error type for Scryfall API calls
#[derive(Debug, Error)]
pub enum ScryfallError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Response body was not the JSON we expected
    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),
    /// Scryfall answered 404 for the lookup
    #[error("Card not found: {0}")]
    NotFound(String),
    /// Scryfall could not pick a single card for the lookup
    #[error("Ambiguous lookup: {0}")]
    Ambiguous(String),
    /// Scryfall returned a structured error object
    #[error("{code}: {details}")]
    Api {
        status: u16,
        code: String,
        details: String,
    },
    /// HTTP error status without a readable error body
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
}

impl ScryfallError {
    /// True when the provider positively reported that nothing matched
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScryfallError::NotFound(_))
    }
}

/// Result alias for Scryfall operations
pub type Result<T> = std::result::Result<T, ScryfallError>;
