//! Buyer order record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId};
use super::price::{CurrencyCode, Price};
use super::status::OrderStatus;

/// An order placed by a buyer for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Ordered product. Not checked against the product fixture.
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
    pub buyer: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: CurrencyCode,
    pub status: OrderStatus,
    pub ordered_at: String,
}

impl Order {
    /// Order total paired with its currency.
    #[must_use]
    pub const fn total(&self) -> Price {
        Price::new(self.amount, self.currency)
    }

    /// Parsed order timestamp.
    ///
    /// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (read as
    /// midnight UTC). Returns `None` for anything else.
    #[must_use]
    pub fn ordered_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.ordered_at)
    }
}

/// Parse a fixture timestamp in either RFC 3339 or date-only form.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
