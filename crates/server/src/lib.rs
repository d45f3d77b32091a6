//! Artisan Hub marketplace API.
//!
//! Serves a fixture-backed catalog, AI content generation with a tagged
//! fallback, Google Cloud translation, speech and vision proxies, social
//! share links and image ingestion.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod audit;
pub mod catalog;
pub mod config;
pub mod error;
pub mod genai;
pub mod google;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use routes::app;
