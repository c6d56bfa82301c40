//! The data-source contract.
//!
//! The core depends only on this shape; the concrete transport and schema
//! live behind it. [`crate::upstream::HttpProductSource`] is the production
//! implementation; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::upstream::{UpstreamPage, UpstreamRecord};

/// A remote product feed.
///
/// Implementations return *raw* upstream records; normalization into
/// canonical types is the query cache's job, so every source is free to
/// speak whatever schema its endpoint actually uses.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one page of the product listing.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when the endpoint cannot be
    /// reached or answers with a non-success status.
    async fn list_products(&self, page: u32) -> Result<UpstreamPage, FetchError>;

    /// Fetch a single product by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] when the id is absent upstream and
    /// [`FetchError::Transport`] for endpoint failures.
    async fn get_product(&self, id: &str) -> Result<UpstreamRecord, FetchError>;
}
