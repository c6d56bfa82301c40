//! Fetch error taxonomy.
//!
//! Errors are `Clone` because a failed fetch is retained as cache state:
//! repeated requests against a known-failed key surface the stored failure
//! without hitting the network again. Retry happens only through explicit
//! invalidation (see [`crate::cache::QueryCache`]).

use thiserror::Error;

/// Errors produced while fetching or normalizing catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The requested entity does not exist upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// The network request or endpoint failed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A record is missing its required identity field.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl FetchError {
    /// Build a transport failure from any displayable error.
    ///
    /// `reqwest::Error` is not `Clone`, so transport failures carry the
    /// rendered message instead of the source error.
    pub fn transport(err: &impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// Whether this failure means the entity is absent rather than the
    /// request having gone wrong.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
