//! A single normalized page of the paginated product feed.

use serde::{Deserialize, Serialize};

use crate::types::product::Product;

/// One page of products, already normalized.
///
/// `next` is the upstream continuation pointer. Its absence terminates the
/// paginated sequence permanently for the query that produced this page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products in this page, in upstream order.
    pub products: Vec<Product>,
    /// Continuation pointer for the next page, if any.
    pub next: Option<String>,
}

impl ProductPage {
    /// Whether a further page exists after this one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Number of products in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether this page carries no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
