//! Marketplace product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ArtisanId, ProductId};
use super::price::{CurrencyCode, Price};

/// Stock level below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A handcrafted product listed by an artisan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// URL-safe handle used by the storefront (`/products/{slug}`).
    pub slug: String,
    pub short_description: String,
    pub long_description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub images: Vec<String>,
    /// Owning artisan. Not checked against the artisan fixture.
    pub artisan_id: ArtisanId,
    pub category: String,
    pub stock: u32,
    pub created_at: String,
}

impl Product {
    /// Price paired with its currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::new(self.price, self.currency)
    }

    /// Whether the product is identified by `key`, either as ID or slug.
    #[must_use]
    pub fn matches_key(&self, key: &str) -> bool {
        self.id == *key || self.slug == key
    }

    /// First listed image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether stock has dropped below [`LOW_STOCK_THRESHOLD`].
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}
