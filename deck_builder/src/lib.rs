//! Deck Builder - Commander deck assembly and validation
//!
//! Reads a CSV of desired cards, resolves each one on Scryfall, checks the
//! Commander construction rules and writes a decklist plus a JSON report.

pub mod csv_reader;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod validator;

#[cfg(test)]
mod test_support;

pub use csv_reader::{parse_card_requests, read_card_requests, CsvLoad, RowError};
pub use error::{CsvError, DeckError, OutputError, ResolveError, Result};
pub use models::{
    CardRequest, Deck, DeckEntry, IssueCategory, Partnership, ResolvedCard, Rule, Severity,
    ValidationIssue,
};
pub use pipeline::{build_deck, DeckBuild, PipelineOptions};
pub use report::{format_summary, render_decklist, write_outputs, OutputPaths, Report, Summary};
pub use resolver::{CardResolver, Lookup};
pub use validator::validate_deck;
