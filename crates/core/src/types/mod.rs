//! Core types for Artisan Hub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod artisan;
pub mod content;
pub mod id;
pub mod order;
pub mod platform;
pub mod price;
pub mod product;
pub mod status;

pub use artisan::Artisan;
pub use content::{ContentKind, ParseContentKindError};
pub use id::*;
pub use order::Order;
pub use platform::{ParsePlatformError, PostPlatform, ShareInstructions, ShareLink, SharePlatform};
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use status::*;
