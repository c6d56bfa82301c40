//! The canonical product entity and its seller identity.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category assigned to products whose upstream record carries none.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Seller username assigned when the upstream record carries no seller.
pub const UNKNOWN_SELLER: &str = "unknown";

/// A product in the catalog.
///
/// This is the canonical shape every upstream record is normalized into.
/// The `id` is globally unique, stable across fetches, and is the sole join
/// key between the list view and the detail view: the detail entry for id X
/// is the same logical entity as any list entry with id X.
///
/// `price` is kept as decimal text at rest (like a wire `Money.amount`) and
/// parsed on demand, so display never suffers floating-point artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Globally unique, immutable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Plain text description.
    pub description: String,
    /// Decimal amount as string (preserves precision).
    pub price: String,
    /// Category label; [`UNCATEGORIZED`] when the upstream had none.
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Seller identity; [`Seller::unknown`] when the upstream had none.
    pub seller: Seller,
}

impl Product {
    /// Parse the price text into a [`Decimal`].
    ///
    /// Returns `None` when the stored text is not a valid decimal. Callers
    /// that sort by price treat an unparseable price as the lowest possible
    /// value rather than an error.
    #[must_use]
    pub fn price_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.price.trim()).ok()
    }
}

/// The seller attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    /// Seller username. Always present; the sentinel [`UNKNOWN_SELLER`]
    /// stands in when the upstream record carried no seller.
    pub username: String,
    /// First name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email address, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Seller {
    /// Sentinel identity for records with no seller information.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            username: UNKNOWN_SELLER.to_owned(),
            first_name: None,
            last_name: None,
            email: None,
        }
    }

    /// Whether this is the sentinel identity rather than a real seller.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.username == UNKNOWN_SELLER
    }
}
