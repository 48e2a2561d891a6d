//! Kinowood catalog client
//!
//! Builds endpoint URLs, fetches through a [`Transport`] and hands the decoded
//! payloads to the normalizer. The client holds no per-request state.

use tracing::{debug, warn};

use crate::catalog::CatalogPage;
use crate::config::ClientConfig;
use crate::decode::{decode_catalog, decode_detail};
use crate::error::ClientError;
use crate::query::encode_component;
use crate::session::PlaybackSession;
use crate::transport::{HttpTransport, Transport};
use crate::types::DetailPayload;

/// Kinowood HTTP Client
pub struct KinowoodClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl KinowoodClient<HttpTransport> {
    /// Create a client backed by reqwest.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> KinowoodClient<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.config.api_base_url
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL of the default listing.
    #[must_use]
    pub fn listing_url(&self) -> String {
        format!("{}{}", self.config.api_base_url, self.config.listing_path)
    }

    /// URL of a search for `query`.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!("{}?q={}", self.listing_url(), encode_component(query))
    }

    /// URL of the detail document for `id`.
    #[must_use]
    pub fn detail_url(&self, id: &str) -> String {
        format!(
            "{}{}?id={}",
            self.config.api_base_url,
            self.config.detail_path,
            encode_component(id)
        )
    }

    async fn fetch_page(&self, url: &str) -> Result<CatalogPage, ClientError> {
        let text = self.transport.fetch_text(url).await.inspect_err(|e| {
            warn!(url, error = %e, "Catalog request failed");
        })?;

        let payload = decode_catalog(&text).inspect_err(|e| {
            warn!(url, error = %e, "Catalog response could not be decoded");
        })?;

        let page = CatalogPage::from_payload(payload);
        debug!(url, movies = page.len(), "Normalized catalog");
        Ok(page)
    }

    /// Fetch and normalize the default listing.
    pub async fn fetch_catalog(&self) -> Result<CatalogPage, ClientError> {
        self.fetch_page(&self.listing_url()).await
    }

    /// Fetch and normalize search results.
    ///
    /// A blank query returns the default listing instead. Any other query is
    /// sent exactly as typed.
    pub async fn search(&self, query: &str) -> Result<CatalogPage, ClientError> {
        if query.trim().is_empty() {
            debug!("Blank search, loading default listing");
            return self.fetch_catalog().await;
        }
        self.fetch_page(&self.search_url(query)).await
    }

    /// Fetch and decode the detail document for a title.
    pub async fn fetch_detail(&self, id: &str) -> Result<DetailPayload, ClientError> {
        let url = self.detail_url(id);
        let text = self.transport.fetch_text(&url).await.inspect_err(|e| {
            warn!(%url, error = %e, "Detail request failed");
        })?;

        decode_detail(&text).inspect_err(|e| {
            warn!(%url, error = %e, "Detail response could not be decoded");
        })
    }

    /// Start a playback session for a decoded detail.
    #[must_use]
    pub fn open_playback(&self, detail: &DetailPayload) -> PlaybackSession {
        PlaybackSession::open(detail.film.video.clone(), self.api_base())
    }
}
