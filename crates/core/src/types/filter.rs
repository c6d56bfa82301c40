//! Pure UI filter state for the derived product view.
//!
//! Filter state is not part of the cache; changing it never triggers a
//! network fetch. It only shapes the derived view computed from the
//! already-accumulated collection.

use serde::{Deserialize, Serialize};

/// Category selection for the list view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    /// Show every category.
    #[default]
    All,
    /// Show only products whose category equals this value exactly
    /// (case-sensitive).
    Only(String),
}

impl CategoryFilter {
    /// Whether a product with the given category passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

/// Price sort applied to the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    /// Keep arrival order.
    #[default]
    Unsorted,
    /// Cheapest first.
    PriceAscending,
    /// Most expensive first.
    PriceDescending,
}

/// Complete filter state for the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterState {
    /// Category selection.
    pub category: CategoryFilter,
    /// Case-insensitive name substring; empty means no search.
    pub search: String,
    /// Price sort order.
    pub sort: SortOrder,
}

impl FilterState {
    /// Whether this state filters or reorders anything at all.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.category == CategoryFilter::All
            && self.search.is_empty()
            && self.sort == SortOrder::Unsorted
    }
}
