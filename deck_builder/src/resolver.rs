//! Card resolution against Scryfall
//!
//! Each request is turned into one lookup, chosen in this order:
//! Scryfall id, then set + collector number, then name within a set, then
//! name alone. Set names are translated to codes through the set catalog,
//! which is fetched at most once per resolver.

use log::{debug, info, warn};
use mtg_common::{looks_like_set_code, ScryfallClient, ScryfallError, SetCatalog};
use std::fmt;
use std::time::Duration;

use crate::error::ResolveError;
use crate::models::{CardRequest, Deck, DeckEntry, ResolvedCard, Rule, ValidationIssue};

/// The single provider lookup used for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(String),
    SetNumber { set: String, number: String },
    NameInSet { name: String, set: String },
    Name(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "id {}", id),
            Lookup::SetNumber { set, number } => write!(f, "{}/{}", set, number),
            Lookup::NameInSet { name, set } => write!(f, "'{}' in {}", name, set),
            Lookup::Name(name) => write!(f, "'{}'", name),
        }
    }
}

impl ResolveError {
    pub fn rule(&self) -> Rule {
        match self {
            ResolveError::NotFound { .. } => Rule::CardNotFound,
            ResolveError::Ambiguous { .. } => Rule::AmbiguousMatch,
            ResolveError::Unavailable { .. } => Rule::ProviderUnavailable,
        }
    }

    pub fn to_issue(&self, request: &CardRequest) -> ValidationIssue {
        ValidationIssue::error(self.rule(), Some(&request.name), self.to_string())
    }
}

/// Outcome of resolving a whole card list
#[derive(Debug, Clone, Default)]
pub struct ResolvedBatch {
    /// Resolved cards in request order
    pub deck: Deck,
    /// Requests that produced no card
    pub unresolved: Vec<CardRequest>,
    /// Resolution failures and set-name warnings
    pub issues: Vec<ValidationIssue>,
}

pub struct CardResolver<'a> {
    client: &'a ScryfallClient,
    request_delay: Duration,
    catalog: Option<SetCatalog>,
    catalog_unavailable: bool,
    calls: usize,
}

impl<'a> CardResolver<'a> {
    pub fn new(client: &'a ScryfallClient) -> Self {
        Self {
            client,
            request_delay: Duration::ZERO,
            catalog: None,
            catalog_unavailable: false,
            calls: 0,
        }
    }

    /// Pause between consecutive provider calls
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Number of provider calls made so far
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Resolve every request in order. Failures never stop the batch.
    pub async fn resolve_all(&mut self, requests: &[CardRequest]) -> ResolvedBatch {
        info!("Resolving {} card requests on Scryfall", requests.len());
        let mut batch = ResolvedBatch::default();

        for request in requests {
            match self.resolve(request, &mut batch.issues).await {
                Ok(card) => {
                    debug!("Resolved {} -> {} ({})", request, card.name, card.set_code);
                    batch.deck.push(DeckEntry::new(request, card));
                }
                Err(e) => {
                    warn!("{}", e);
                    batch.issues.push(e.to_issue(request));
                    batch.unresolved.push(request.clone());
                }
            }
        }

        info!(
            "Resolved {} of {} requests ({} provider calls)",
            batch.deck.len(),
            requests.len(),
            self.calls
        );
        batch
    }

    /// Resolve one request. Set-name warnings are appended to `notes`.
    pub async fn resolve(
        &mut self,
        request: &CardRequest,
        notes: &mut Vec<ValidationIssue>,
    ) -> Result<ResolvedCard, ResolveError> {
        let lookup = self.plan(request, notes).await;
        debug!("Looking up {} via {}", request, lookup);

        self.pace().await;
        let result = match &lookup {
            Lookup::Id(id) => self.client.card_by_id(id).await,
            Lookup::SetNumber { set, number } => self.client.card_by_set_number(set, number).await,
            Lookup::NameInSet { name, set } => self.client.card_named(name, Some(set)).await,
            Lookup::Name(name) => self.client.card_named(name, None).await,
        };

        let described = format!("{} (lookup {})", request, lookup);
        match result {
            Ok(card) => Ok(ResolvedCard::from(card)),
            Err(e) if e.is_not_found() => Err(ResolveError::NotFound { request: described }),
            Err(ScryfallError::Ambiguous(details)) => Err(ResolveError::Ambiguous {
                request: described,
                details,
            }),
            Err(source) => Err(ResolveError::Unavailable {
                request: described,
                source,
            }),
        }
    }

    /// Choose the lookup for a request without calling the card endpoints
    pub async fn plan(&mut self, request: &CardRequest, notes: &mut Vec<ValidationIssue>) -> Lookup {
        if let Some(ref id) = request.scryfall_id {
            return Lookup::Id(id.clone());
        }

        let set = match request.set {
            Some(ref input) => self.set_code_for(input, request, notes).await,
            None => None,
        };

        match (set, &request.collector_number) {
            (Some(set), Some(number)) => Lookup::SetNumber {
                set,
                number: number.clone(),
            },
            (Some(set), None) => Lookup::NameInSet {
                name: request.name.clone(),
                set,
            },
            (None, _) => Lookup::Name(request.name.clone()),
        }
    }

    async fn set_code_for(
        &mut self,
        input: &str,
        request: &CardRequest,
        notes: &mut Vec<ValidationIssue>,
    ) -> Option<String> {
        if looks_like_set_code(input) {
            return Some(input.trim().to_lowercase());
        }

        let code = match self.catalog().await {
            Some(catalog) => catalog.find_code(input).map(str::to_string),
            None => {
                notes.push(ValidationIssue::warning(
                    Rule::UnknownSet,
                    Some(&request.name),
                    format!(
                        "Set catalog unavailable, could not resolve set '{}' for {}; looked up by name only",
                        input, request
                    ),
                ));
                return None;
            }
        };

        match code {
            Some(code) => {
                debug!("Set name '{}' resolved to code '{}'", input, code);
                Some(code)
            }
            None => {
                warn!("Unknown set '{}' for {}", input, request);
                notes.push(ValidationIssue::warning(
                    Rule::UnknownSet,
                    Some(&request.name),
                    format!(
                        "Unknown set '{}' for {}; looked up by name only",
                        input, request
                    ),
                ));
                None
            }
        }
    }

    async fn catalog(&mut self) -> Option<&SetCatalog> {
        if self.catalog.is_none() && !self.catalog_unavailable {
            self.pace().await;
            match self.client.sets().await {
                Ok(sets) => self.catalog = Some(SetCatalog::new(sets)),
                Err(e) => {
                    warn!("Failed to fetch set catalog: {}", e);
                    self.catalog_unavailable = true;
                }
            }
        }
        self.catalog.as_ref()
    }

    async fn pace(&mut self) {
        if self.calls > 0 && !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
        self.calls += 1;
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
