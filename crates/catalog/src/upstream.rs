//! Raw upstream schema and the HTTP product source.
//!
//! The upstream deliberately does not speak the canonical schema: the list
//! endpoint may answer with a Django-style envelope
//! (`{count, next, previous, results}`) or a bare JSON array, records name
//! the product `title` instead of `name`, and ids and prices arrive as
//! numbers. None of that leaks past [`crate::normalize`].

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::FetchError;
use crate::source::ProductSource;

/// A product record exactly as the upstream sends it.
///
/// Everything except the identity is optional; deterministic fallbacks are
/// applied during normalization. `id` and `price` stay as raw JSON values
/// because upstreams disagree on whether they are numbers or strings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamRecord {
    /// Identity field; a record without one is malformed.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    /// Product name; some upstreams call this `title`.
    #[serde(default, alias = "title")]
    pub name: Option<String>,
    /// Description text.
    #[serde(default)]
    pub description: Option<String>,
    /// Price as number or decimal string.
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    /// Category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Seller identity, if the upstream tracks one.
    #[serde(default)]
    pub seller: Option<UpstreamSeller>,
}

/// Seller identity as the upstream sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSeller {
    /// Seller username.
    pub username: String,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// A raw page of the product listing.
///
/// The intended upstream wraps results in a pagination envelope; the mock
/// upstream answers with a bare array. A bare array carries no continuation
/// pointer, which terminates the paginated sequence after one page.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UpstreamPage {
    /// Django REST framework style envelope.
    Envelope {
        /// Total result count across all pages.
        #[serde(default)]
        count: u64,
        /// URL of the next page, if any.
        #[serde(default)]
        next: Option<String>,
        /// URL of the previous page, if any.
        #[serde(default)]
        previous: Option<String>,
        /// Records in this page.
        results: Vec<UpstreamRecord>,
    },
    /// Bare array of records, no pagination metadata.
    Bare(Vec<UpstreamRecord>),
}

impl UpstreamPage {
    /// Split into records and the continuation pointer.
    #[must_use]
    pub fn into_parts(self) -> (Vec<UpstreamRecord>, Option<String>) {
        match self {
            Self::Envelope { next, results, .. } => (results, next),
            Self::Bare(results) => (results, None),
        }
    }
}

/// HTTP implementation of [`ProductSource`] via `reqwest`.
pub struct HttpProductSource {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
    page_size: Option<u32>,
}

impl HttpProductSource {
    /// Create a new HTTP source from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when the base URL cannot be
    /// extended with the products path (e.g. a `mailto:` style URL).
    pub fn new(config: &CatalogConfig) -> Result<Self, FetchError> {
        // Fail fast on base URLs that cannot take a path segment.
        config
            .upstream_url
            .join("products/")
            .map_err(|e| FetchError::transport(&e))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.upstream_url.clone(),
            api_token: config.api_token.clone(),
            page_size: config.page_size,
        })
    }

    fn products_url(&self) -> Result<Url, FetchError> {
        self.base_url
            .join("products")
            .map_err(|e| FetchError::transport(&e))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        what: &str,
    ) -> Result<T, FetchError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| FetchError::transport(&e))?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(what.to_owned()));
        }
        if !status.is_success() {
            return Err(FetchError::Transport(format!("HTTP {status} for {what}")));
        }

        response.json().await.map_err(|e| FetchError::transport(&e))
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    #[instrument(skip(self))]
    async fn list_products(&self, page: u32) -> Result<UpstreamPage, FetchError> {
        let mut url = self.products_url()?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            if let Some(limit) = self.page_size {
                pairs.append_pair("limit", &limit.to_string());
            }
        }

        debug!(%url, "fetching product page");
        self.get_json(url, &format!("product page {page}")).await
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: &str) -> Result<UpstreamRecord, FetchError> {
        let url = self
            .base_url
            .join(&format!("products/{id}"))
            .map_err(|e| FetchError::transport(&e))?;

        debug!(%url, "fetching product detail");
        self.get_json(url, &format!("product {id}")).await
    }
}
