//! Mana colors and color identity

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One of the five mana colors, ordered W, U, B, R, G
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    /// Returns the single-letter mana symbol (e.g., "W", "U")
    pub fn symbol(&self) -> &'static str {
        match self {
            Color::White => "W",
            Color::Blue => "U",
            Color::Black => "B",
            Color::Red => "R",
            Color::Green => "G",
        }
    }

    /// Parse a mana symbol, case-insensitive, with or without braces
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let trimmed = symbol.trim().trim_start_matches('{').trim_end_matches('}');
        match trimmed.to_uppercase().as_str() {
            "W" => Some(Color::White),
            "U" => Some(Color::Blue),
            "B" => Some(Color::Black),
            "R" => Some(Color::Red),
            "G" => Some(Color::Green),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Set of colors a card (or a commander pair) is identified with.
///
/// Serializes as Scryfall does, an array of symbols such as `["W", "U"]`.
/// Unknown symbols in incoming data are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ColorIdentity {
    colors: BTreeSet<Color>,
}

impl ColorIdentity {
    /// Colorless identity
    pub fn colorless() -> Self {
        Self::default()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    pub fn is_colorless(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors in WUBRG order
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }

    pub fn union(&self, other: &ColorIdentity) -> ColorIdentity {
        ColorIdentity {
            colors: self.colors.union(&other.colors).copied().collect(),
        }
    }

    pub fn is_subset(&self, other: &ColorIdentity) -> bool {
        self.colors.is_subset(&other.colors)
    }

    /// Colors present in `self` but not in `allowed`
    pub fn outside_of(&self, allowed: &ColorIdentity) -> Vec<Color> {
        self.colors.difference(&allowed.colors).copied().collect()
    }

    /// Symbols as strings, in WUBRG order
    pub fn symbols(&self) -> Vec<String> {
        self.iter().map(|c| c.symbol().to_string()).collect()
    }
}

impl FromIterator<Color> for ColorIdentity {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        ColorIdentity {
            colors: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<String>> for ColorIdentity {
    fn from(symbols: Vec<String>) -> Self {
        symbols
            .iter()
            .filter_map(|symbol| {
                let color = Color::from_symbol(symbol);
                if color.is_none() {
                    log::warn!("Ignoring unknown color identity symbol: {}", symbol);
                }
                color
            })
            .collect()
    }
}

impl From<ColorIdentity> for Vec<String> {
    fn from(identity: ColorIdentity) -> Self {
        identity.symbols()
    }
}

impl fmt::Display for ColorIdentity {
    /// Renders as concatenated symbols ("WU"), or "C" for colorless
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_colorless() {
            return f.write_str("C");
        }
        for color in &self.colors {
            f.write_str(color.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
