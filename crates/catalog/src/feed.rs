//! Append-only accumulator for the paginated product feed.
//!
//! Pages are concatenated in arrival order and nothing is ever removed or
//! reordered here; reordering is a derived-view concern. Ids are not
//! deduplicated across pages - the upstream is trusted to return disjoint
//! pages.

use nexus_catalog_core::{Product, ProductPage};

/// The running collection for the catalog listing query.
#[derive(Debug, Clone)]
pub struct CatalogFeed {
    products: Vec<Product>,
    next_page: u32,
    has_more: bool,
    revision: u64,
}

impl Default for CatalogFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogFeed {
    /// An empty feed, ready to request page 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
            next_page: 1,
            has_more: true,
            revision: 0,
        }
    }

    /// Append a resolved page.
    ///
    /// The page's products are concatenated after the existing collection;
    /// the has-more flag is taken from the page's continuation pointer.
    /// Once a page arrives without one, the sequence is terminated for the
    /// rest of the session.
    pub fn append_page(&mut self, page: &ProductPage) {
        self.products.extend_from_slice(&page.products);
        self.has_more = page.has_more();
        self.next_page += 1;
        self.revision += 1;
    }

    /// The accumulated products, in arrival order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Whether a further page exists for this query.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// The page number the next fetch should request.
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Monotonic counter bumped on every append.
    ///
    /// Serves as the memoization key for derived views: equal revisions
    /// mean an identical collection.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of accumulated products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether nothing has been accumulated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
