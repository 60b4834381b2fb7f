//! End-to-end deck building: resolve, designate commanders, validate, report

use log::{info, warn};
use mtg_common::ScryfallClient;
use std::collections::HashSet;
use std::time::Duration;

use crate::csv_reader::{CsvLoad, RowError};
use crate::models::{CardRequest, Deck, DeckEntry, ValidationIssue};
use crate::report::Report;
use crate::resolver::{CardResolver, ResolvedBatch};
use crate::validator::validate_deck;

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Commander names from the command line
    pub commanders: Vec<String>,
    /// Pause between consecutive Scryfall calls
    pub request_delay: Duration,
}

/// The resolved deck and its report
#[derive(Debug, Clone)]
pub struct DeckBuild {
    pub deck: Deck,
    pub report: Report,
}

/// Resolve every request, flag the commanders, run all rules and build the
/// report. Never fails: every problem ends up as an issue in the report.
pub async fn build_deck(
    client: &ScryfallClient,
    load: CsvLoad,
    options: &PipelineOptions,
) -> DeckBuild {
    let mut issues: Vec<ValidationIssue> =
        load.row_errors.iter().map(RowError::to_issue).collect();

    let mut resolver = CardResolver::new(client).with_request_delay(options.request_delay);
    let mut batch = resolver.resolve_all(&load.requests).await;
    issues.append(&mut batch.issues);

    designate_commanders(&mut resolver, &mut batch, &options.commanders, &mut issues).await;

    issues.extend(validate_deck(&batch.deck));

    let report = Report::new(&batch.deck, batch.unresolved, issues);
    info!(
        "Deck built: {} cards, {} error(s), {} warning(s)",
        report.summary.total_cards, report.summary.errors, report.summary.warnings
    );

    DeckBuild {
        deck: batch.deck,
        report,
    }
}

/// Flag matching deck entries as commanders. A name that is not in the card
/// list is resolved on its own and added with quantity 1.
async fn designate_commanders(
    resolver: &mut CardResolver<'_>,
    batch: &mut ResolvedBatch,
    names: &[String],
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();

    for name in names {
        let name = name.trim();
        if name.is_empty() || !seen.insert(name.to_lowercase()) {
            continue;
        }

        let matched = batch.deck.designate_commander(name);
        if matched > 0 {
            info!("Commander '{}' designated ({} entry/entries)", name, matched);
            continue;
        }

        if batch
            .unresolved
            .iter()
            .any(|r| r.name.eq_ignore_ascii_case(name))
        {
            warn!("Commander '{}' failed to resolve from the card list", name);
            continue;
        }

        info!("Commander '{}' not in the card list, resolving it by name", name);
        let request = CardRequest::named(name);
        match resolver.resolve(&request, issues).await {
            Ok(card) => {
                let mut entry = DeckEntry::new(&request, card);
                entry.commander = true;
                batch.deck.push(entry);
            }
            Err(e) => {
                warn!("{}", e);
                issues.push(e.to_issue(&request));
                batch.unresolved.push(request);
            }
        }
    }
}
