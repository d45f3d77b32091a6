//! Artisan Hub Core - Shared domain types.
//!
//! This crate provides the types used across the Artisan Hub components:
//! - `server` - Marketplace HTTP API (catalog, AI content, social, images)
//! - `integration-tests` - Router-level tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Share-link construction lives here because it is plain string
//! templating over a closed set of platforms.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, order status, catalog records, content
//!   kinds and social platforms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
