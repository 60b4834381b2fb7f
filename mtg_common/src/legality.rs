//! Per-format legality as reported by Scryfall

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Legality status of a card in one format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegalityStatus {
    Legal,
    NotLegal,
    Restricted,
    Banned,
    /// Allowed in the deck but not as the commander
    BannedAsCommander,
    /// Any status string we do not recognize
    Unknown(String),
}

impl LegalityStatus {
    /// Parse a Scryfall status string (e.g., "legal", "not_legal")
    pub fn parse(status: &str) -> Self {
        match status.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "legal" => LegalityStatus::Legal,
            "not_legal" => LegalityStatus::NotLegal,
            "restricted" => LegalityStatus::Restricted,
            "banned" => LegalityStatus::Banned,
            "banned_as_commander" => LegalityStatus::BannedAsCommander,
            _ => LegalityStatus::Unknown(status.to_string()),
        }
    }

    /// Returns the Scryfall status string
    pub fn as_str(&self) -> &str {
        match self {
            LegalityStatus::Legal => "legal",
            LegalityStatus::NotLegal => "not_legal",
            LegalityStatus::Restricted => "restricted",
            LegalityStatus::Banned => "banned",
            LegalityStatus::BannedAsCommander => "banned_as_commander",
            LegalityStatus::Unknown(s) => s,
        }
    }
}

impl fmt::Display for LegalityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map of format name to raw status string, e.g. `{"commander": "legal"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Legalities(BTreeMap<String, String>);

impl Legalities {
    /// Status for a format, or None if the provider did not list it
    pub fn status(&self, format: &str) -> Option<LegalityStatus> {
        self.0
            .get(&format.to_lowercase())
            .map(|s| LegalityStatus::parse(s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Legalities {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Legalities(
            iter.into_iter()
                .map(|(k, v)| {
                    let format: String = k.into();
                    (format.to_lowercase(), v.into())
                })
                .collect(),
        )
    }
}
