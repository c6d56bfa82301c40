//! Canonical types for the Nexus catalog.

pub mod filter;
pub mod page;
pub mod product;

pub use filter::{CategoryFilter, FilterState, SortOrder};
pub use page::ProductPage;
pub use product::{Product, Seller};
