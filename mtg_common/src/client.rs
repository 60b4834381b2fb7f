//! Async Scryfall API client
//!
//! Each method performs exactly one HTTP request (list endpoints follow
//! `next_page` links). No retries, no caching.

use crate::error::{Result, ScryfallError};
use crate::scryfall::{ScryfallCard, ScryfallErrorBody, ScryfallList, ScryfallSet};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Public Scryfall API endpoint
pub const DEFAULT_API_URL: &str = "https://api.scryfall.com";

/// Connection settings for [`ScryfallClient`]
#[derive(Debug, Clone)]
pub struct ScryfallConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ScryfallConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "D2D-Automations-DeckBuilder/1.0".to_string(),
        }
    }
}

/// Read-only Scryfall client
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScryfallClient {
    pub fn new(config: ScryfallConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client against the given base URL with default settings
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(ScryfallConfig {
            base_url: base_url.to_string(),
            ..ScryfallConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a card by its Scryfall id
    pub async fn card_by_id(&self, id: &str) -> Result<ScryfallCard> {
        let url = format!("{}/cards/{}", self.base_url, urlencoding::encode(id.trim()));
        self.get_json(&url).await
    }

    /// Fetch a card by set code and collector number
    pub async fn card_by_set_number(
        &self,
        set_code: &str,
        collector_number: &str,
    ) -> Result<ScryfallCard> {
        let url = format!(
            "{}/cards/{}/{}",
            self.base_url,
            urlencoding::encode(&set_code.to_lowercase()),
            urlencoding::encode(collector_number.trim())
        );
        self.get_json(&url).await
    }

    /// Fetch a card by exact name, optionally restricted to one set.
    /// Without a set Scryfall picks its default printing.
    pub async fn card_named(&self, name: &str, set_code: Option<&str>) -> Result<ScryfallCard> {
        let mut url = format!(
            "{}/cards/named?exact={}",
            self.base_url,
            urlencoding::encode(name.trim())
        );
        if let Some(set) = set_code {
            url.push_str("&set=");
            url.push_str(&urlencoding::encode(&set.to_lowercase()));
        }
        self.get_json(&url).await
    }

    /// Fetch the full set catalog
    pub async fn sets(&self) -> Result<Vec<ScryfallSet>> {
        let mut url = format!("{}/sets", self.base_url);
        let mut sets = Vec::new();

        loop {
            let page: ScryfallList<ScryfallSet> = self.get_json(&url).await?;
            sets.extend(page.data);
            match page.next_page {
                Some(next) if page.has_more => url = next,
                _ => break,
            }
        }

        log::info!("Fetched {} sets from Scryfall", sets.len());
        Ok(sets)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        Err(error_from_response(status, &body))
    }
}

fn error_from_response(status: StatusCode, body: &str) -> ScryfallError {
    let Ok(error) = serde_json::from_str::<ScryfallErrorBody>(body) else {
        return ScryfallError::HttpStatus(status);
    };

    if status == StatusCode::NOT_FOUND {
        if error.kind.as_deref() == Some("ambiguous") {
            return ScryfallError::Ambiguous(error.details);
        }
        return ScryfallError::NotFound(error.details);
    }

    ScryfallError::Api {
        status: error.status,
        code: error.code,
        details: error.details,
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
