//! Seller dashboard summary derived from the catalog.

use std::collections::BTreeMap;

use artisan_hub_core::{Order, OrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{Catalog, sort_newest_first};

/// Number of orders listed under `recentOrders`.
pub const RECENT_ORDERS: usize = 5;

/// Aggregate figures for the seller dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary<'a> {
    /// Sum of all non-cancelled order amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    pub total_orders: usize,
    pub total_artisans: usize,
    pub total_products: usize,
    /// Products with stock below the low-stock threshold.
    pub low_stock_products: usize,
    /// Order count per status; every status is present.
    pub orders_by_status: BTreeMap<&'static str, usize>,
    /// Non-cancelled sales per calendar month, oldest first.
    pub monthly_sales: Vec<MonthlySales>,
    pub recent_orders: Vec<&'a Order>,
}

/// Sales total for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySales {
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

impl<'a> DashboardSummary<'a> {
    /// Summarize the whole catalog.
    #[must_use]
    pub fn compute(catalog: &'a Catalog) -> Self {
        let orders = catalog.all_orders();
        let sales = || orders.iter().filter(|o| o.status.counts_as_sale());

        let mut orders_by_status: BTreeMap<&'static str, usize> =
            OrderStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
        for order in orders {
            *orders_by_status.entry(order.status.as_str()).or_default() += 1;
        }

        // Orders without a parseable date cannot be bucketed and are skipped
        let mut by_month: BTreeMap<String, Decimal> = BTreeMap::new();
        for order in sales() {
            if let Some(at) = order.ordered_at_utc() {
                *by_month.entry(at.format("%Y-%m").to_string()).or_default() += order.amount;
            }
        }

        let mut recent: Vec<&Order> = orders.iter().collect();
        sort_newest_first(&mut recent);
        recent.truncate(RECENT_ORDERS);

        Self {
            total_sales: sales().map(|o| o.amount).sum(),
            total_orders: orders.len(),
            total_artisans: catalog.artisans().len(),
            total_products: catalog.all_products().len(),
            low_stock_products: catalog
                .all_products()
                .iter()
                .filter(|p| p.is_low_stock())
                .count(),
            orders_by_status,
            monthly_sales: by_month
                .into_iter()
                .map(|(month, value)| MonthlySales { month, value })
                .collect(),
            recent_orders: recent,
        }
    }
}
