//! Shared fakes for the catalog integration tests.
//!
//! [`FakeCatalog`] is an in-memory [`ProductSource`] with scripted pages,
//! per-endpoint call counters, an optional per-call delay, and a failure
//! switch, so tests can exercise single-flight, retry, and partial-failure
//! behavior without a network.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use nexus_catalog::upstream::{UpstreamPage, UpstreamRecord};
use nexus_catalog::{FetchError, ProductSource};

/// Build a raw upstream record the way the mock upstream renders one:
/// numeric id optional, `title` instead of `name`, numeric price.
///
/// # Panics
///
/// Panics if the literal JSON shape stops matching `UpstreamRecord`.
#[must_use]
pub fn record(id: &str, title: &str, price: f64, category: &str) -> UpstreamRecord {
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "price": price,
        "category": category,
        "image": format!("https://img.example.test/{id}.png"),
        "seller": {"username": "nexus_official"}
    }))
    .expect("record literal matches UpstreamRecord")
}

/// In-memory scripted product source.
pub struct FakeCatalog {
    pages: Vec<Vec<UpstreamRecord>>,
    products: HashMap<String, UpstreamRecord>,
    /// Calls made against the list endpoint.
    pub list_calls: AtomicUsize,
    /// Calls made against the detail endpoint.
    pub get_calls: AtomicUsize,
    delay: Option<Duration>,
    failing: AtomicBool,
}

impl FakeCatalog {
    /// A catalog of `page_count` pages with `per_page` products each.
    ///
    /// Ids are `p<page>-<index>`, categories alternate between
    /// `electronics` and `clothing`, prices descend within a page so sorting
    /// has something to do.
    #[must_use]
    pub fn with_pages(page_count: u32, per_page: u32) -> Self {
        let mut pages = Vec::new();
        let mut products = HashMap::new();

        for page in 1..=page_count {
            let mut records = Vec::new();
            for index in 0..per_page {
                let id = format!("p{page}-{index}");
                let category = if index % 2 == 0 { "electronics" } else { "clothing" };
                let price = f64::from(per_page - index) + 0.5;
                let rec = record(&id, &format!("Unit {id}"), price, category);
                products.insert(id, rec.clone());
                records.push(rec);
            }
            pages.push(records);
        }

        Self {
            pages,
            products,
            list_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            delay: None,
            failing: AtomicBool::new(false),
        }
    }

    /// Add a per-call delay so tests can overlap in-flight requests.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Insert a standalone detail record not present in any page.
    #[must_use]
    pub fn with_product(mut self, rec: UpstreamRecord) -> Self {
        if let Some(serde_json::Value::String(id)) = &rec.id {
            self.products.insert(id.clone(), rec);
        }
        self
    }

    /// Toggle transport failure for both endpoints.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductSource for FakeCatalog {
    async fn list_products(&self, page: u32) -> Result<UpstreamPage, FetchError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Transport("connection reset".to_owned()));
        }

        let index = page.checked_sub(1).map(|i| i as usize);
        let results = index
            .and_then(|i| self.pages.get(i))
            .cloned()
            .unwrap_or_default();
        let next = index
            .filter(|i| i + 1 < self.pages.len())
            .map(|_| format!("/api/products/?page={}", page + 1));

        Ok(UpstreamPage::Envelope {
            count: self.products.len() as u64,
            next,
            previous: None,
            results,
        })
    }

    async fn get_product(&self, id: &str) -> Result<UpstreamRecord, FetchError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Transport("connection reset".to_owned()));
        }
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("product {id}")))
    }
}
