//! Deck builder data model: requests, resolved cards, the deck and issues

use mtg_common::{ColorIdentity, Legalities, LegalityStatus, ScryfallCard};
use serde::Serialize;
use std::fmt;

/// Format key used for legality lookups
pub const COMMANDER_FORMAT: &str = "commander";

/// One desired card, as read from a CSV row (or a command-line commander)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRequest {
    /// CSV line number (header is line 1); None for command-line commanders
    pub row: Option<usize>,
    pub name: String,
    pub set: Option<String>,
    pub quantity: u32,
    pub collector_number: Option<String>,
    pub scryfall_id: Option<String>,
}

impl CardRequest {
    /// Request for a single copy by name only
    pub fn named(name: &str) -> Self {
        Self {
            row: None,
            name: name.trim().to_string(),
            set: None,
            quantity: 1,
            collector_number: None,
            scryfall_id: None,
        }
    }
}

impl fmt::Display for CardRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "row {}: '{}'", row, self.name)?,
            None => write!(f, "'{}'", self.name)?,
        }
        if let Some(ref set) = self.set {
            write!(f, " set '{}'", set)?;
        }
        if let Some(ref number) = self.collector_number {
            write!(f, " number '{}'", number)?;
        }
        if let Some(ref id) = self.scryfall_id {
            write!(f, " id '{}'", id)?;
        }
        Ok(())
    }
}

/// How many copies of a card a Commander deck may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyLimit {
    Unlimited,
    AtMost(u32),
}

impl CopyLimit {
    pub fn allows(&self, count: u32) -> bool {
        match self {
            CopyLimit::Unlimited => true,
            CopyLimit::AtMost(limit) => count <= *limit,
        }
    }
}

/// Canonical card record produced by the resolver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCard {
    pub scryfall_id: String,
    pub name: String,
    pub set_code: String,
    pub set_name: String,
    pub collector_number: String,
    pub type_line: String,
    pub oracle_text: String,
    pub keywords: Vec<String>,
    pub color_identity: ColorIdentity,
    pub legalities: Legalities,
}

impl From<ScryfallCard> for ResolvedCard {
    fn from(card: ScryfallCard) -> Self {
        let type_line = card.full_type_line();
        let oracle_text = card.full_oracle_text();
        Self {
            scryfall_id: card.id,
            name: card.name,
            set_code: card.set.to_lowercase(),
            set_name: card.set_name,
            collector_number: card.collector_number,
            type_line,
            oracle_text,
            keywords: card.keywords,
            color_identity: card.color_identity,
            legalities: card.legalities,
        }
    }
}

impl ResolvedCard {
    /// Name of the front face ("Esika, God of the Tree" for a modal DFC)
    pub fn front_face_name(&self) -> &str {
        self.name.split(" // ").next().unwrap_or(&self.name)
    }

    /// True if `name` refers to this card, by full or front-face name
    pub fn matches_name(&self, name: &str) -> bool {
        let wanted = name.trim();
        self.name.eq_ignore_ascii_case(wanted) || self.front_face_name().eq_ignore_ascii_case(wanted)
    }

    pub fn is_basic_land(&self) -> bool {
        self.type_line.contains("Basic Land")
    }

    fn front_type_line(&self) -> &str {
        self.type_line.split(" // ").next().unwrap_or(&self.type_line)
    }

    pub fn is_legendary_creature(&self) -> bool {
        let front = self.front_type_line();
        front.contains("Legendary") && front.contains("Creature")
    }

    pub fn is_background(&self) -> bool {
        self.front_type_line().contains("Background")
    }

    /// Legendary creature, or explicitly allowed by its own text
    pub fn can_be_commander(&self) -> bool {
        self.is_legendary_creature()
            || self
                .oracle_text
                .to_lowercase()
                .contains("can be your commander")
    }

    /// The pairing ability printed on the card, if any. Rules text wins over
    /// keywords because only the text carries the "Partner with" name.
    pub fn partnership(&self) -> Option<Partnership> {
        self.oracle_text
            .lines()
            .find_map(Partnership::from_text)
            .or_else(|| self.keywords.iter().find_map(|k| Partnership::from_text(k)))
    }

    pub fn has_partner(&self) -> bool {
        self.partnership().is_some()
    }

    pub fn chooses_background(&self) -> bool {
        self.has_ability(&["choose a background"])
    }

    /// Keyword or a rules-text line starting with one of `prefixes`
    fn has_ability(&self, prefixes: &[&str]) -> bool {
        let starts = |text: &str| {
            let lower = text.trim().to_lowercase();
            prefixes.iter().any(|p| lower.starts_with(p))
        };
        self.keywords.iter().any(|k| starts(k)) || self.oracle_text.lines().any(starts)
    }

    pub fn commander_legality(&self) -> Option<LegalityStatus> {
        self.legalities.status(COMMANDER_FORMAT)
    }

    /// Copy limit from the deck-construction rules and the card's own text
    pub fn copy_limit(&self) -> CopyLimit {
        if self.is_basic_land() {
            return CopyLimit::Unlimited;
        }

        let text = self.oracle_text.to_lowercase();
        if text.contains("a deck can have any number of cards named") {
            return CopyLimit::Unlimited;
        }

        const UP_TO: &str = "a deck can have up to ";
        if let Some(start) = text.find(UP_TO) {
            let count = text[start + UP_TO.len()..]
                .split_whitespace()
                .next()
                .and_then(parse_count);
            if let Some(count) = count {
                return CopyLimit::AtMost(count);
            }
        }

        CopyLimit::AtMost(1)
    }
}

/// Abilities that let two commanders share a deck. Only matching kinds pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Partnership {
    Partner,
    /// "Partner with NAME": pairs only with the named card
    PartnerWith(String),
    FriendsForever,
}

impl Partnership {
    /// Parse a keyword or a rules-text line. Reminder text in parentheses
    /// is ignored.
    pub fn from_text(text: &str) -> Option<Self> {
        let line = text.split(" (").next().unwrap_or(text).trim();
        let lower = line.to_lowercase();

        if lower.starts_with("friends forever") {
            return Some(Partnership::FriendsForever);
        }
        const PARTNER_WITH: &str = "partner with";
        if lower.starts_with(PARTNER_WITH) {
            let partner = line.get(PARTNER_WITH.len()..).unwrap_or("").trim();
            // Scryfall keywords say "Partner with" without the name
            if partner.is_empty() {
                return Some(Partnership::PartnerWith(String::new()));
            }
            return Some(Partnership::PartnerWith(partner.to_string()));
        }
        if lower == "partner" {
            return Some(Partnership::Partner);
        }
        None
    }
}

fn parse_count(word: &str) -> Option<u32> {
    if let Ok(n) = word.parse::<u32>() {
        return Some(n);
    }
    let n = match word {
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        _ => return None,
    };
    Some(n)
}

/// A resolved card with its requested quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckEntry {
    pub card: ResolvedCard,
    pub quantity: u32,
    /// Name as written in the CSV (or on the command line)
    pub requested_name: String,
    pub row: Option<usize>,
    pub commander: bool,
}

impl DeckEntry {
    pub fn new(request: &CardRequest, card: ResolvedCard) -> Self {
        Self {
            card,
            quantity: request.quantity,
            requested_name: request.name.clone(),
            row: request.row,
            commander: false,
        }
    }
}

/// Ordered deck entries; commanders are flagged in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    entries: Vec<DeckEntry>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: DeckEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn commanders(&self) -> impl Iterator<Item = &DeckEntry> {
        self.entries.iter().filter(|e| e.commander)
    }

    /// Everything except the commanders
    pub fn main_deck(&self) -> impl Iterator<Item = &DeckEntry> {
        self.entries.iter().filter(|e| !e.commander)
    }

    /// Sum of quantities, commanders included. Saturates at `u32::MAX`.
    pub fn total_cards(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.quantity))
    }

    /// Union of the commanders' color identities
    pub fn commander_identity(&self) -> ColorIdentity {
        self.commanders()
            .fold(ColorIdentity::colorless(), |acc, e| {
                acc.union(&e.card.color_identity)
            })
    }

    /// Flag every entry whose card or requested name matches `name`.
    /// Returns how many entries were flagged.
    pub fn designate_commander(&mut self, name: &str) -> usize {
        let mut matched = 0;
        for entry in &mut self.entries {
            if entry.card.matches_name(name) || entry.requested_name.eq_ignore_ascii_case(name.trim()) {
                entry.commander = true;
                matched += 1;
            }
        }
        matched
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Which stage produced an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    /// Malformed CSV row
    Parse,
    /// Card could not be looked up
    Resolution,
    /// Deck construction rule violated
    Rule,
}

/// The check an issue was raised by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    MalformedRow,
    UnknownSet,
    CardNotFound,
    AmbiguousMatch,
    ProviderUnavailable,
    CommanderCount,
    CommanderPairing,
    CommanderEligibility,
    DeckSize,
    Singleton,
    ColorIdentity,
    Banned,
    NotLegal,
    Restricted,
    BannedAsCommander,
    UnknownLegality,
}

impl Rule {
    pub fn category(&self) -> IssueCategory {
        match self {
            Rule::MalformedRow => IssueCategory::Parse,
            Rule::UnknownSet
            | Rule::CardNotFound
            | Rule::AmbiguousMatch
            | Rule::ProviderUnavailable => IssueCategory::Resolution,
            _ => IssueCategory::Rule,
        }
    }
}

/// One problem found while building or validating the deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub category: IssueCategory,
    pub rule: Rule,
    /// Affected card, when the issue is about a specific card
    pub card: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(rule: Rule, card: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, rule, card, message.into())
    }

    pub fn warning(rule: Rule, card: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, rule, card, message.into())
    }

    fn new(severity: Severity, rule: Rule, card: Option<&str>, message: String) -> Self {
        Self {
            severity,
            category: rule.category(),
            rule,
            card: card.map(str::to_string),
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
