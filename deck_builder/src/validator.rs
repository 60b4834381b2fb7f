//! Commander deck construction rules.
//!
//! Every rule runs independently over the whole deck and reports every
//! violation it finds. An empty result means the deck is legal.

use log::{debug, info, warn};
use mtg_common::LegalityStatus;
use std::collections::HashMap;

use crate::models::{CopyLimit, Deck, DeckEntry, Partnership, Rule, ValidationIssue};

/// Required deck size, commanders included
pub const DECK_SIZE: u32 = 100;

/// Maximum number of commanders (a partner pair)
pub const MAX_COMMANDERS: usize = 2;

/// Runs all rules and returns every issue found.
pub fn validate_deck(deck: &Deck) -> Vec<ValidationIssue> {
    info!(
        "Validating deck: {} entries, {} cards, {} commander(s)",
        deck.len(),
        deck.total_cards(),
        deck.commanders().count()
    );

    let mut issues = Vec::new();
    issues.extend(check_commander_count(deck));
    issues.extend(check_commander_pairing(deck));
    issues.extend(check_commander_eligibility(deck));
    issues.extend(check_deck_size(deck));
    issues.extend(check_singleton(deck));
    issues.extend(check_color_identity(deck));
    issues.extend(check_format_legality(deck));

    if issues.is_empty() {
        info!("Deck passed all Commander rules");
    } else {
        warn!("Validation found {} issue(s)", issues.len());
    }
    issues
}

pub fn check_commander_count(deck: &Deck) -> Vec<ValidationIssue> {
    let count = deck.commanders().count();
    if count == 0 {
        vec![ValidationIssue::error(
            Rule::CommanderCount,
            None,
            "No commander designated. Pass --commander NAME (two names for partners).",
        )]
    } else if count > MAX_COMMANDERS {
        vec![ValidationIssue::error(
            Rule::CommanderCount,
            None,
            format!(
                "{} commanders designated; Commander allows one, or two with Partner or a Background.",
                count
            ),
        )]
    } else {
        Vec::new()
    }
}

fn is_legal_pair(a: &DeckEntry, b: &DeckEntry) -> bool {
    let partners = match (a.card.partnership(), b.card.partnership()) {
        (Some(Partnership::Partner), Some(Partnership::Partner)) => true,
        (Some(Partnership::FriendsForever), Some(Partnership::FriendsForever)) => true,
        (Some(Partnership::PartnerWith(a_partner)), Some(Partnership::PartnerWith(b_partner))) => {
            b.card.matches_name(&a_partner) && a.card.matches_name(&b_partner)
        }
        _ => false,
    };

    partners
        || (a.card.chooses_background() && b.card.is_background())
        || (b.card.chooses_background() && a.card.is_background())
}

pub fn check_commander_pairing(deck: &Deck) -> Vec<ValidationIssue> {
    let commanders: Vec<&DeckEntry> = deck.commanders().collect();
    let [first, second] = commanders.as_slice() else {
        return Vec::new();
    };

    if is_legal_pair(first, second) {
        return Vec::new();
    }
    vec![ValidationIssue::error(
        Rule::CommanderPairing,
        Some(&format!("{} + {}", first.card.name, second.card.name)),
        format!(
            "Two commanders designated, but {} and {} do not share a Partner or Friends forever ability and are not a Background pairing.",
            first.card.name, second.card.name
        ),
    )]
}

pub fn check_commander_eligibility(deck: &Deck) -> Vec<ValidationIssue> {
    let commanders: Vec<&DeckEntry> = deck.commanders().collect();

    commanders
        .iter()
        .filter(|commander| {
            if commander.card.can_be_commander() {
                return false;
            }
            // A Background is eligible when paired with a "Choose a Background" commander
            let paired_background = commander.card.is_background()
                && commanders
                    .iter()
                    .any(|other| other.card.chooses_background());
            !paired_background
        })
        .map(|commander| {
            ValidationIssue::error(
                Rule::CommanderEligibility,
                Some(&commander.card.name),
                format!(
                    "Commander '{}' is not eligible: '{}' is not a Legendary Creature and its text does not allow it.",
                    commander.card.name, commander.card.type_line
                ),
            )
        })
        .collect()
}

pub fn check_deck_size(deck: &Deck) -> Vec<ValidationIssue> {
    let total = deck.total_cards();
    if total == DECK_SIZE {
        return Vec::new();
    }
    vec![ValidationIssue::error(
        Rule::DeckSize,
        None,
        format!(
            "Deck must contain exactly {} cards including commander(s); found {}.",
            DECK_SIZE, total
        ),
    )]
}

pub fn check_singleton(deck: &Deck) -> Vec<ValidationIssue> {
    // Count per canonical name, keeping first-seen order for stable output
    let mut order: Vec<&DeckEntry> = Vec::new();
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for entry in deck.entries() {
        let count = counts.entry(entry.card.name.as_str()).or_insert(0);
        if *count == 0 {
            order.push(entry);
        }
        *count = count.saturating_add(entry.quantity);
    }

    order
        .into_iter()
        .filter_map(|entry| {
            let count = counts[entry.card.name.as_str()];
            let limit = entry.card.copy_limit();
            if limit.allows(count) {
                return None;
            }
            let allowed = match limit {
                CopyLimit::AtMost(n) => n,
                CopyLimit::Unlimited => count,
            };
            Some(ValidationIssue::error(
                Rule::Singleton,
                Some(&entry.card.name),
                format!(
                    "Singleton violation: {} appears {} times ({} over the limit of {}).",
                    entry.card.name,
                    count,
                    count - allowed,
                    allowed
                ),
            ))
        })
        .collect()
}

pub fn check_color_identity(deck: &Deck) -> Vec<ValidationIssue> {
    if deck.commanders().next().is_none() {
        debug!("No commander, skipping color identity check");
        return Vec::new();
    }
    let allowed = deck.commander_identity();

    deck.main_deck()
        .filter_map(|entry| {
            let outside = entry.card.color_identity.outside_of(&allowed);
            if outside.is_empty() {
                return None;
            }
            let symbols: Vec<&str> = outside.iter().map(|c| c.symbol()).collect();
            Some(ValidationIssue::error(
                Rule::ColorIdentity,
                Some(&entry.card.name),
                format!(
                    "Color identity mismatch: {} has {} outside commander identity {}.",
                    entry.card.name,
                    symbols.join(", "),
                    allowed
                ),
            ))
        })
        .collect()
}

pub fn check_format_legality(deck: &Deck) -> Vec<ValidationIssue> {
    deck.entries()
        .iter()
        .filter_map(legality_issue)
        .collect()
}

fn legality_issue(entry: &DeckEntry) -> Option<ValidationIssue> {
    let name = entry.card.name.as_str();
    let status = match entry.card.commander_legality() {
        Some(status) => status,
        None => {
            return Some(ValidationIssue::warning(
                Rule::UnknownLegality,
                Some(name),
                format!("No Commander legality listed for {}.", name),
            ))
        }
    };

    match status {
        LegalityStatus::Legal => None,
        LegalityStatus::Banned => Some(ValidationIssue::error(
            Rule::Banned,
            Some(name),
            format!("BANNED in Commander: {} (status {}).", name, status),
        )),
        LegalityStatus::NotLegal => Some(ValidationIssue::error(
            Rule::NotLegal,
            Some(name),
            format!("Not legal in Commander: {} (status {}).", name, status),
        )),
        LegalityStatus::Restricted => Some(ValidationIssue::warning(
            Rule::Restricted,
            Some(name),
            format!("Restricted in Commander: {} (status {}).", name, status),
        )),
        LegalityStatus::BannedAsCommander if entry.commander => Some(ValidationIssue::error(
            Rule::BannedAsCommander,
            Some(name),
            format!("{} is banned as a commander (status {}).", name, status),
        )),
        LegalityStatus::BannedAsCommander => Some(ValidationIssue::warning(
            Rule::BannedAsCommander,
            Some(name),
            format!(
                "{} is banned as a commander but allowed in the deck (status {}).",
                name, status
            ),
        )),
        LegalityStatus::Unknown(_) => Some(ValidationIssue::warning(
            Rule::UnknownLegality,
            Some(name),
            format!("Unrecognized Commander legality for {} (status {}).", name, status),
        )),
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
