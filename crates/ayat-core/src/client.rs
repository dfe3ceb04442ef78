use log::{debug, info};
use reqwest::header::USER_AGENT;
use reqwest::Client;

use crate::config::{Config, EditionSource};
use crate::error::EditionError;
use crate::verse::{Editions, LanguageEdition};

/// HTTP client for the read-only edition documents
#[derive(Clone)]
pub struct EditionClient {
    client: Client,
}

impl Default for EditionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl EditionClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn fetch_edition(
        &self,
        source: &EditionSource,
    ) -> Result<LanguageEdition, EditionError> {
        debug!("fetching {} from {}", source.label, source.url);

        let response = self
            .client
            .get(&source.url)
            .header(USER_AGENT, concat!("ayat/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| EditionError::Http {
                url: source.url.clone(),
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(EditionError::Status {
                url: source.url.clone(),
                status: response.status(),
            });
        }

        let body = response.bytes().await.map_err(|e| EditionError::Http {
            url: source.url.clone(),
            source: e,
        })?;

        let edition = LanguageEdition::from_slice(source.label.clone(), &body)?;
        debug!("{}: {} verses", source.label, edition.len());
        Ok(edition)
    }

    /// Fetch all three editions concurrently. Any failure fails the load.
    pub async fn fetch_all(&self, config: &Config) -> Result<Editions, EditionError> {
        let (original, translation_a, translation_b) = tokio::try_join!(
            self.fetch_edition(&config.original),
            self.fetch_edition(&config.translation_a),
            self.fetch_edition(&config.translation_b),
        )?;

        info!(
            "loaded editions: {} ({}), {} ({}), {} ({})",
            original.label(),
            original.len(),
            translation_a.label(),
            translation_a.len(),
            translation_b.label(),
            translation_b.len()
        );

        Ok(Editions {
            original,
            translation_a,
            translation_b,
        })
    }
}
