//! Nexus Catalog Core - Shared domain types.
//!
//! This crate provides the canonical types used across the Nexus catalog
//! components:
//! - `catalog` - Query cache, pagination, and derived views
//! - `cli` - Command-line catalog browser
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no async.
//! Every upstream record is normalized into these shapes exactly once, at
//! the fetch boundary; everything downstream consumes them without having
//! to branch on absent fields.
//!
//! # Modules
//!
//! - [`types`] - `Product`, `Seller`, `ProductPage`, and filter state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
