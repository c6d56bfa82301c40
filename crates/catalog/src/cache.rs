//! Single-flight query cache for remote fetches.
//!
//! One `moka` future cache per endpoint, keyed by the request parameter.
//! `get_with` gives the single-flight guarantee: concurrent callers for the
//! same key await one underlying fetch and share its outcome. The stored
//! value is a `Result`, so failures live in the cache too - a known-failed
//! key answers immediately with the stored failure until a caller
//! explicitly invalidates it.
//!
//! This is the only component that writes cache state; the feed and any
//! presentation layer only read what it resolves.

use std::sync::Arc;

use moka::future::Cache;
use nexus_catalog_core::{Product, ProductPage};
use tracing::{debug, instrument};

use crate::error::FetchError;
use crate::normalize::{normalize, normalize_page};
use crate::source::ProductSource;

/// Keyed store of in-flight and completed fetches.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<QueryCacheInner>,
}

struct QueryCacheInner {
    source: Arc<dyn ProductSource>,
    pages: Cache<u32, Result<ProductPage, FetchError>>,
    products: Cache<String, Result<Product, FetchError>>,
}

impl QueryCache {
    /// Create a cache over the given data source.
    ///
    /// Entries live for the whole session; there is no eviction.
    #[must_use]
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            inner: Arc::new(QueryCacheInner {
                source,
                pages: Cache::builder().build(),
                products: Cache::builder().build(),
            }),
        }
    }

    /// Fetch one page of the product listing.
    ///
    /// Resolved entries return without a network call; in-flight entries
    /// are awaited alongside the original requester. Each record in a fresh
    /// page is normalized, with malformed records dropped rather than
    /// failing the page.
    ///
    /// # Errors
    ///
    /// Returns the stored [`FetchError`] for failed entries, fresh or
    /// cached.
    #[instrument(skip(self))]
    pub async fn page(&self, page: u32) -> Result<ProductPage, FetchError> {
        let source = Arc::clone(&self.inner.source);
        self.inner
            .pages
            .get_with(page, async move {
                debug!(page, "page cache miss, fetching from source");
                let raw = source.list_products(page).await?;
                Ok(normalize_page(raw))
            })
            .await
    }

    /// Fetch a single product by id.
    ///
    /// Same caching discipline as [`Self::page`]. A missing upstream id
    /// resolves to a stored [`FetchError::NotFound`] entry.
    ///
    /// # Errors
    ///
    /// Returns the stored [`FetchError`] for failed entries, fresh or
    /// cached.
    #[instrument(skip(self))]
    pub async fn product(&self, id: &str) -> Result<Product, FetchError> {
        let source = Arc::clone(&self.inner.source);
        let key = id.to_owned();
        let fetch_id = key.clone();
        self.inner
            .products
            .get_with(key, async move {
                debug!(id = %fetch_id, "product cache miss, fetching from source");
                let raw = source.get_product(&fetch_id).await?;
                normalize(raw)
            })
            .await
    }

    /// Drop the entry for one page so the next request refetches it.
    ///
    /// This is the caller-initiated retry path for failed pages.
    pub async fn invalidate_page(&self, page: u32) {
        self.inner.pages.invalidate(&page).await;
    }

    /// Drop the entry for one product so the next request refetches it.
    pub async fn invalidate_product(&self, id: &str) {
        self.inner.products.invalidate(id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::upstream::{UpstreamPage, UpstreamRecord};

    /// Source that counts calls and optionally fails or stalls.
    struct CountingSource {
        list_calls: AtomicUsize,
        get_calls: AtomicUsize,
        fail_lists: bool,
        delay: Option<Duration>,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                list_calls: AtomicUsize::new(0),
                get_calls: AtomicUsize::new(0),
                fail_lists: false,
                delay: None,
            }
        }

        fn failing() -> Self {
            Self {
                fail_lists: true,
                ..Self::new()
            }
        }

        fn slow() -> Self {
            Self {
                delay: Some(Duration::from_millis(50)),
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl ProductSource for CountingSource {
        async fn list_products(&self, page: u32) -> Result<UpstreamPage, FetchError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_lists {
                return Err(FetchError::Transport("connection lost".to_owned()));
            }
            let json = format!(
                r#"{{"count": 1, "next": null, "previous": null,
                     "results": [{{"id": "page-{page}-item", "title": "Item", "price": 1}}]}}"#
            );
            Ok(serde_json::from_str(&json).expect("valid page"))
        }

        async fn get_product(&self, id: &str) -> Result<UpstreamRecord, FetchError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            if id == "missing" {
                return Err(FetchError::NotFound(format!("product {id}")));
            }
            let json = format!(r#"{{"id": "{id}", "title": "Item {id}", "price": 2.5}}"#);
            Ok(serde_json::from_str(&json).expect("valid record"))
        }
    }

    #[tokio::test]
    async fn resolved_page_is_served_from_cache() {
        let source = Arc::new(CountingSource::new());
        let cache = QueryCache::new(Arc::clone(&source) as Arc<dyn ProductSource>);

        let first = cache.page(1).await.expect("first fetch");
        let second = cache.page(1).await.expect("cached fetch");

        assert_eq!(first, second);
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_flight() {
        let source = Arc::new(CountingSource::slow());
        let cache = QueryCache::new(Arc::clone(&source) as Arc<dyn ProductSource>);

        let (a, b) = tokio::join!(cache.page(1), cache.page(1));
        assert_eq!(a.expect("a"), b.expect("b"));
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_entry_is_retained_until_invalidated() {
        let source = Arc::new(CountingSource::failing());
        let cache = QueryCache::new(Arc::clone(&source) as Arc<dyn ProductSource>);

        let first = cache.page(1).await.unwrap_err();
        let second = cache.page(1).await.unwrap_err();
        assert_eq!(first, second);
        // The second request surfaced the stored failure with no new call.
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 1);

        cache.invalidate_page(1).await;
        let _ = cache.page(1).await;
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn missing_product_is_a_stored_not_found() {
        let source = Arc::new(CountingSource::new());
        let cache = QueryCache::new(Arc::clone(&source) as Arc<dyn ProductSource>);

        let err = cache.product("missing").await.unwrap_err();
        assert!(err.is_not_found());

        let again = cache.product("missing").await.unwrap_err();
        assert_eq!(err, again);
        assert_eq!(source.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn list_and_detail_caches_are_independent() {
        let source = Arc::new(CountingSource::new());
        let cache = QueryCache::new(Arc::clone(&source) as Arc<dyn ProductSource>);

        cache.page(1).await.expect("page");
        let product = cache.product("p-9").await.expect("product");
        assert_eq!(product.id, "p-9");
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.get_calls.load(Ordering::SeqCst), 1);
    }
}
