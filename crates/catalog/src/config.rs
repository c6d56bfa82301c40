//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_UPSTREAM_URL` - Base URL of the product feed
//!   (default: `https://fakestoreapi.com/`)
//! - `CATALOG_API_TOKEN` - Bearer token for upstreams that require auth
//! - `CATALOG_PAGE_SIZE` - Page size hint forwarded to the upstream
//!
//! The intended upstream sits behind auth, so the token slot exists even
//! though the default mock upstream ignores it.

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default upstream when `CATALOG_UPSTREAM_URL` is unset.
pub const DEFAULT_UPSTREAM_URL: &str = "https://fakestoreapi.com/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that does not parse.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog client configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the upstream product feed.
    pub upstream_url: Url,
    /// Bearer token for authenticated upstreams.
    pub api_token: Option<SecretString>,
    /// Page size hint; `None` leaves paging entirely to the upstream.
    pub page_size: Option<u32>,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("upstream_url", &self.upstream_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl CatalogConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] when `CATALOG_UPSTREAM_URL`
    /// is not a valid URL or `CATALOG_PAGE_SIZE` is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let upstream_url = match std::env::var("CATALOG_UPSTREAM_URL") {
            Ok(raw) => Url::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_UPSTREAM_URL".to_owned(), e.to_string())
            })?,
            Err(_) => Self::default_upstream_url(),
        };

        let api_token = std::env::var("CATALOG_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        let page_size = match std::env::var("CATALOG_PAGE_SIZE") {
            Ok(raw) => Some(raw.parse::<u32>().map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_PAGE_SIZE".to_owned(), e.to_string())
            })?),
            Err(_) => None,
        };

        Ok(Self {
            upstream_url,
            api_token,
            page_size,
        })
    }

    /// Configuration pointing at the default mock upstream, no auth.
    #[must_use]
    pub fn mock_upstream() -> Self {
        Self {
            upstream_url: Self::default_upstream_url(),
            api_token: None,
            page_size: None,
        }
    }

    fn default_upstream_url() -> Url {
        // The default is a compile-time constant and always parses.
        Url::parse(DEFAULT_UPSTREAM_URL).unwrap_or_else(|_| unreachable!())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_upstream_points_at_default() {
        let config = CatalogConfig::mock_upstream();
        assert_eq!(config.upstream_url.as_str(), DEFAULT_UPSTREAM_URL);
        assert!(config.api_token.is_none());
        assert!(config.page_size.is_none());
    }

    #[test]
    fn debug_redacts_api_token() {
        let config = CatalogConfig {
            api_token: Some(SecretString::from("super-secret")),
            ..CatalogConfig::mock_upstream()
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn invalid_url_error_names_the_variable() {
        let err = ConfigError::InvalidEnvVar(
            "CATALOG_UPSTREAM_URL".to_owned(),
            "relative URL without a base".to_owned(),
        );
        assert!(err.to_string().contains("CATALOG_UPSTREAM_URL"));
    }
}
