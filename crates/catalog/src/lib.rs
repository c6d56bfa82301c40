//! Nexus Catalog - client-side query cache and derived views.
//!
//! # Architecture
//!
//! - [`source`] - the data-source contract the rest of the crate depends on
//! - [`upstream`] - raw upstream schema plus a `reqwest` implementation
//! - [`normalize`] - maps heterogeneous upstream records into canonical types
//! - [`cache`] - single-flight query cache via `moka` (failures included)
//! - [`feed`] - append-only accumulator for the paginated product feed
//! - [`view`] - pure filtered/sorted projections of the accumulated feed
//! - [`session`] - the read-only surface a presentation layer consumes
//!
//! Data flows one way: a page request goes through the [`cache::QueryCache`],
//! which de-duplicates concurrent fetches per key, normalizes the response,
//! and stores the outcome; the [`feed::CatalogFeed`] appends resolved pages
//! in arrival order; [`view::derive_view`] recomputes the visible sequence
//! whenever the feed or the filter state changes, and never writes anything
//! back. The cache maps are written only by the query cache itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nexus_catalog::{CatalogConfig, CatalogSession, HttpProductSource};
//!
//! let config = CatalogConfig::from_env()?;
//! let source = Arc::new(HttpProductSource::new(&config)?);
//! let session = CatalogSession::new(source);
//!
//! session.load_next_page().await?;
//! for product in session.view().await.iter() {
//!     println!("{} - {}", product.name, product.price);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod normalize;
pub mod session;
pub mod source;
pub mod upstream;
pub mod view;

pub use cache::QueryCache;
pub use config::{CatalogConfig, ConfigError};
pub use error::FetchError;
pub use feed::CatalogFeed;
pub use session::{CatalogSession, DetailStatus};
pub use source::ProductSource;
pub use upstream::HttpProductSource;
