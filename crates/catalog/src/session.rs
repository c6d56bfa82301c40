//! The catalog session: the surface a presentation layer consumes.
//!
//! A session owns the query cache, the paginated feed, the filter state,
//! and the detail-view selection. Presentation code only reads: the derived
//! view, the known categories, the has-more flag, and the detail status.
//! The filter setters mutate UI state only and never touch the network.
//!
//! Page loads are serialized: a load in progress gates further loads, so
//! page N+1 is never requested (let alone applied) before page N resolves.

use std::sync::Arc;

use nexus_catalog_core::{CategoryFilter, FilterState, Product, SortOrder};
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::QueryCache;
use crate::error::FetchError;
use crate::feed::CatalogFeed;
use crate::source::ProductSource;
use crate::view::{derive_view, known_categories};

/// State of the single-product detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    /// No product selected.
    Idle,
    /// A fetch for the selected id is in flight.
    Loading,
    /// The selected product resolved.
    Ready(Box<Product>),
    /// The fetch for the selected id failed; the UI shows its
    /// "not found / corrupted" state and offers a path back to the list.
    Failed(FetchError),
}

/// Memoized derived view keyed on its two inputs.
struct ViewCache {
    revision: u64,
    filter: FilterState,
    products: Arc<[Product]>,
}

struct DetailState {
    selected: Option<String>,
    status: DetailStatus,
}

struct SessionState {
    feed: CatalogFeed,
    filter: FilterState,
    loading: bool,
    feed_error: Option<FetchError>,
    view_cache: Option<ViewCache>,
    detail: DetailState,
}

/// A browsing session over the product catalog.
///
/// Cheaply cloneable; clones share the same cache and state.
#[derive(Clone)]
pub struct CatalogSession {
    cache: QueryCache,
    state: Arc<Mutex<SessionState>>,
}

impl CatalogSession {
    /// Create a session over the given data source.
    #[must_use]
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self::with_cache(QueryCache::new(source))
    }

    /// Create a session over an existing query cache.
    #[must_use]
    pub fn with_cache(cache: QueryCache) -> Self {
        Self {
            cache,
            state: Arc::new(Mutex::new(SessionState {
                feed: CatalogFeed::new(),
                filter: FilterState::default(),
                loading: false,
                feed_error: None,
                view_cache: None,
                detail: DetailState {
                    selected: None,
                    status: DetailStatus::Idle,
                },
            })),
        }
    }

    // =========================================================================
    // Paginated feed
    // =========================================================================

    /// Fetch and append the next page of the feed.
    ///
    /// Returns `Ok(true)` when a page was appended, `Ok(false)` when there
    /// was nothing to do (no further pages, or a load already in flight).
    /// On failure the already-accumulated pages are untouched and the error
    /// is also retained as [`Self::feed_error`].
    ///
    /// # Errors
    ///
    /// Propagates the [`FetchError`] of the failed page fetch.
    pub async fn load_next_page(&self) -> Result<bool, FetchError> {
        let page = {
            let mut state = self.state.lock().await;
            if state.loading || !state.feed.has_more() {
                return Ok(false);
            }
            state.loading = true;
            state.feed.next_page()
        };

        let result = self.cache.page(page).await;

        let mut state = self.state.lock().await;
        state.loading = false;
        match result {
            Ok(resolved) => {
                state.feed.append_page(&resolved);
                state.feed_error = None;
                debug!(page, total = state.feed.len(), "appended page to feed");
                Ok(true)
            }
            Err(err) => {
                state.feed_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Whether a further page exists for the feed.
    pub async fn has_more(&self) -> bool {
        self.state.lock().await.feed.has_more()
    }

    /// Whether a page load is currently in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// The most recent feed failure, if the last load failed.
    ///
    /// The UI treats this as transient ("connection lost"); the
    /// accumulated pages stay visible behind it.
    pub async fn feed_error(&self) -> Option<FetchError> {
        self.state.lock().await.feed_error.clone()
    }

    /// Invalidate the failed page and try loading it again.
    ///
    /// This is the UI's implicit-retry-on-next-interaction path.
    ///
    /// # Errors
    ///
    /// Propagates the [`FetchError`] if the retried fetch fails again.
    pub async fn retry_feed(&self) -> Result<bool, FetchError> {
        let page = {
            let state = self.state.lock().await;
            if state.loading {
                return Ok(false);
            }
            state.feed.next_page()
        };
        self.cache.invalidate_page(page).await;
        self.load_next_page().await
    }

    // =========================================================================
    // Derived view
    // =========================================================================

    /// The current derived view of the feed.
    ///
    /// Recomputed only when the feed or the filter state changed since the
    /// last call; otherwise the memoized snapshot is returned.
    pub async fn view(&self) -> Arc<[Product]> {
        let mut state = self.state.lock().await;
        let revision = state.feed.revision();

        if let Some(cached) = &state.view_cache
            && cached.revision == revision
            && cached.filter == state.filter
        {
            return Arc::clone(&cached.products);
        }

        let products: Arc<[Product]> = derive_view(state.feed.products(), &state.filter).into();
        state.view_cache = Some(ViewCache {
            revision,
            filter: state.filter.clone(),
            products: Arc::clone(&products),
        });
        products
    }

    /// Distinct categories present in the full accumulated collection.
    pub async fn categories(&self) -> Vec<String> {
        let state = self.state.lock().await;
        known_categories(state.feed.products())
    }

    /// The current filter state.
    pub async fn filter(&self) -> FilterState {
        self.state.lock().await.filter.clone()
    }

    /// Select a category. Never triggers network activity.
    pub async fn set_category(&self, category: CategoryFilter) {
        self.state.lock().await.filter.category = category;
    }

    /// Set the search string. Never triggers network activity.
    pub async fn set_search(&self, search: impl Into<String> + Send) {
        self.state.lock().await.filter.search = search.into();
    }

    /// Set the price sort order. Never triggers network activity.
    pub async fn set_sort(&self, sort: SortOrder) {
        self.state.lock().await.filter.sort = sort;
    }

    // =========================================================================
    // Detail view
    // =========================================================================

    /// Select a product and fetch it.
    ///
    /// If the selection changes while the fetch is in flight, the resolved
    /// result is discarded instead of overwriting the newer selection
    /// (identifier-equality guard at apply time). Returns the detail status
    /// after the fetch settles.
    pub async fn select_product(&self, id: &str) -> DetailStatus {
        {
            let mut state = self.state.lock().await;
            state.detail.selected = Some(id.to_owned());
            state.detail.status = DetailStatus::Loading;
        }

        let result = self.cache.product(id).await;

        let mut state = self.state.lock().await;
        if state.detail.selected.as_deref() != Some(id) {
            debug!(id, "discarding stale detail result");
            return state.detail.status.clone();
        }

        state.detail.status = match result {
            Ok(product) => DetailStatus::Ready(Box::new(product)),
            Err(err) => DetailStatus::Failed(err),
        };
        state.detail.status.clone()
    }

    /// The current detail status.
    pub async fn detail(&self) -> DetailStatus {
        self.state.lock().await.detail.status.clone()
    }

    /// Clear the detail selection (navigating back to the list).
    pub async fn clear_selection(&self) {
        let mut state = self.state.lock().await;
        state.detail.selected = None;
        state.detail.status = DetailStatus::Idle;
    }

    /// Invalidate the selected product's cache entry and fetch it again.
    pub async fn retry_detail(&self) -> DetailStatus {
        let Some(id) = self.state.lock().await.detail.selected.clone() else {
            return DetailStatus::Idle;
        };
        self.cache.invalidate_product(&id).await;
        self.select_product(&id).await
    }
}
