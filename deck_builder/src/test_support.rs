//! Card builders shared by the unit tests

use crate::models::{CardRequest, DeckEntry, ResolvedCard};
use mtg_common::{ColorIdentity, Legalities};

pub fn identity(symbols: &str) -> ColorIdentity {
    ColorIdentity::from(symbols.chars().map(|c| c.to_string()).collect::<Vec<_>>())
}

/// A commander-legal card with the given type line and color identity
pub fn card(name: &str, type_line: &str, colors: &str) -> ResolvedCard {
    ResolvedCard {
        scryfall_id: format!("id-{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        set_code: "tst".to_string(),
        set_name: "Test Set".to_string(),
        collector_number: "1".to_string(),
        type_line: type_line.to_string(),
        oracle_text: String::new(),
        keywords: Vec::new(),
        color_identity: identity(colors),
        legalities: legal_in_commander("legal"),
    }
}

pub fn legal_in_commander(status: &str) -> Legalities {
    [("commander", status)].into_iter().collect()
}

pub fn entry(card: ResolvedCard, quantity: u32) -> DeckEntry {
    let mut request = CardRequest::named(&card.name);
    request.quantity = quantity;
    DeckEntry::new(&request, card)
}

pub fn commander_entry(card: ResolvedCard) -> DeckEntry {
    let mut entry = entry(card, 1);
    entry.commander = true;
    entry
}
