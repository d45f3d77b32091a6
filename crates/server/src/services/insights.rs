//! Seller performance metrics.

use artisan_hub_core::{ArtisanId, CurrencyCode, OrderStatus, Price};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{Catalog, ProductFilter};

/// Performance figures for one artisan, computed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtisanMetrics {
    /// Delivered orders of the artisan's products.
    pub sales: usize,
    /// Sum of delivered order amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub currency: CurrencyCode,
    /// Orders in any status.
    pub orders: usize,
    pub products: usize,
    /// Units on hand across all products.
    pub stock: u64,
}

impl ArtisanMetrics {
    /// Compute metrics for `artisan_id`.
    #[must_use]
    pub fn compute(catalog: &Catalog, artisan_id: &ArtisanId) -> Self {
        let products = catalog.products(&ProductFilter {
            artisan_id: Some(artisan_id.to_string()),
            ..ProductFilter::default()
        });
        let orders = catalog.orders_for_artisan(artisan_id);
        let delivered: Vec<_> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .collect();

        Self {
            sales: delivered.len(),
            revenue: delivered.iter().map(|o| o.amount).sum(),
            currency: products.first().map(|p| p.currency).unwrap_or_default(),
            orders: orders.len(),
            products: products.len(),
            stock: products.iter().map(|p| u64::from(p.stock)).sum(),
        }
    }

    /// Revenue as a displayable price.
    #[must_use]
    pub const fn revenue_price(&self) -> Price {
        Price::new(self.revenue, self.currency)
    }
}
