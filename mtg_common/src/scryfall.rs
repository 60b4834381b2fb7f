//! Scryfall response models

use crate::color::ColorIdentity;
use crate::legality::Legalities;
use serde::{Deserialize, Serialize};

/// Scryfall card response
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScryfallCard {
    pub id: String,
    pub name: String,
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub collector_number: String,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub color_identity: ColorIdentity,
    #[serde(default)]
    pub legalities: Legalities,
    /// For double-faced and split cards, rules text lives in card_faces
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
}

impl ScryfallCard {
    /// Type line of the card, joining faces with " // " when the card has no
    /// top-level type line
    pub fn full_type_line(&self) -> String {
        if let Some(ref type_line) = self.type_line {
            return type_line.clone();
        }
        self.faces()
            .iter()
            .filter_map(|face| face.type_line.as_deref())
            .collect::<Vec<_>>()
            .join(" // ")
    }

    /// Rules text of the card, joining all faces for multi-faced cards
    pub fn full_oracle_text(&self) -> String {
        if let Some(ref text) = self.oracle_text {
            return text.clone();
        }
        self.faces()
            .iter()
            .filter_map(|face| face.oracle_text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn faces(&self) -> &[CardFace] {
        self.card_faces.as_deref().unwrap_or(&[])
    }
}

/// Scryfall set object (only the fields we need)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScryfallSet {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub set_type: Option<String>,
}

/// Paginated list wrapper used by list endpoints such as `/sets`
#[derive(Debug, Deserialize)]
pub(crate) struct ScryfallList<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
}

/// Scryfall API error response
#[derive(Debug, Deserialize)]
pub(crate) struct ScryfallErrorBody {
    pub status: u16,
    pub code: String,
    pub details: String,
    /// Set to "ambiguous" when a name lookup matched several cards
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Returns true if the input has the shape of a set code (3-5 ASCII
/// alphanumerics, e.g. "KLD", "2X2", "PLST")
pub fn looks_like_set_code(input: &str) -> bool {
    let s = input.trim();
    (3..=5).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// The provider's set catalog, used to turn full set names into codes
#[derive(Debug, Clone, Default)]
pub struct SetCatalog {
    sets: Vec<ScryfallSet>,
}

impl SetCatalog {
    pub fn new(sets: Vec<ScryfallSet>) -> Self {
        Self { sets }
    }

    /// Look up the code for a set name: exact case-insensitive match first,
    /// then the first set whose name contains the input
    pub fn find_code(&self, set_name: &str) -> Option<&str> {
        let wanted = set_name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }

        self.sets
            .iter()
            .find(|set| set.name.to_lowercase() == wanted)
            .or_else(|| {
                self.sets
                    .iter()
                    .find(|set| set.name.to_lowercase().contains(&wanted))
            })
            .map(|set| set.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
