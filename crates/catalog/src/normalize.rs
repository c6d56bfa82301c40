//! Normalization of raw upstream records into canonical types.
//!
//! Pure functions, no I/O. Coercions are deterministic: numeric ids and
//! prices become their decimal text rendering, absent optional fields get
//! explicit sentinels so downstream code never branches on absence. The
//! only hard failure is a record without an identity.

use nexus_catalog_core::{Product, ProductPage, Seller, product::UNCATEGORIZED};
use tracing::warn;

use crate::error::FetchError;
use crate::upstream::{UpstreamPage, UpstreamRecord, UpstreamSeller};

/// Normalize a single upstream record into a canonical [`Product`].
///
/// # Errors
///
/// Returns [`FetchError::MalformedRecord`] when the record carries no
/// usable `id`. This is distinct from an empty result: the record exists
/// but cannot participate in the catalog.
pub fn normalize(raw: UpstreamRecord) -> Result<Product, FetchError> {
    let id = coerce_text(raw.id)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| FetchError::MalformedRecord("record is missing an id".to_owned()))?;

    let category = raw
        .category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| UNCATEGORIZED.to_owned());

    Ok(Product {
        id,
        name: raw.name.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        price: coerce_text(raw.price).unwrap_or_else(|| "0".to_owned()),
        category,
        image: raw.image.unwrap_or_default(),
        seller: raw.seller.map_or_else(Seller::unknown, normalize_seller),
    })
}

/// Normalize a raw page, dropping malformed records.
///
/// A malformed record must not fail the whole page: it is dropped with a
/// warning and the remainder stays usable.
#[must_use]
pub fn normalize_page(raw: UpstreamPage) -> ProductPage {
    let (records, next) = raw.into_parts();
    let mut products = Vec::with_capacity(records.len());

    for record in records {
        match normalize(record) {
            Ok(product) => products.push(product),
            Err(err) => {
                warn!(error = %err, "dropping malformed record from page");
            }
        }
    }

    ProductPage { products, next }
}

fn normalize_seller(raw: UpstreamSeller) -> Seller {
    Seller {
        username: raw.username,
        first_name: raw.first_name,
        last_name: raw.last_name,
        email: raw.email,
    }
}

/// Render a raw JSON id or price as text.
///
/// Numbers keep their JSON decimal rendering, so `10.99` becomes `"10.99"`
/// with no float round-trip in between.
fn coerce_text(value: Option<serde_json::Value>) -> Option<String> {
    match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
