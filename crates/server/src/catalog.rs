//! Read-only catalog snapshot backed by JSON fixtures.
//!
//! The catalog is loaded once at start-up from a fixtures directory and then
//! shared immutably through [`crate::state::AppState`]. Queries never mutate
//! it, so concurrent requests need no coordination.
//!
//! # Fixture Files
//!
//! ```text
//! {FIXTURES_DIR}/products.json   - array of Product
//! {FIXTURES_DIR}/artisans.json   - array of Artisan
//! {FIXTURES_DIR}/orders.json     - array of Order
//! ```
//!
//! # Query Semantics
//!
//! Filters are conjunctive and order-preserving. A positive `limit`
//! truncates the filtered list; zero, negative or unparseable limits are
//! ignored. Orders are additionally sorted newest-first after truncation.

use std::path::{Path, PathBuf};

use artisan_hub_core::{Artisan, ArtisanId, Order, Product};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while loading fixtures.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Fixture file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fixture file is not a valid array of records.
    #[error("invalid fixture {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Filters for product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Category, compared case-insensitively.
    pub category: Option<String>,
    /// Owning artisan, compared exactly.
    pub artisan_id: Option<String>,
    /// Maximum number of results when positive.
    pub limit: Option<usize>,
}

/// Filters for order listings.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Status, compared case-insensitively.
    pub status: Option<String>,
    /// Ordered product, compared exactly.
    pub product_id: Option<String>,
    /// Maximum number of results when positive.
    pub limit: Option<usize>,
}

/// Immutable snapshot of products, artisans and orders.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    artisans: Vec<Artisan>,
    orders: Vec<Order>,
}

impl Catalog {
    /// Build a catalog from in-memory records.
    #[must_use]
    pub const fn new(products: Vec<Product>, artisans: Vec<Artisan>, orders: Vec<Order>) -> Self {
        Self {
            products,
            artisans,
            orders,
        }
    }

    /// Load all three fixture files from `dir`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` naming the first file that is missing or does
    /// not deserialize.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let products: Vec<Product> = load_fixture(&dir.join("products.json"))?;
        let artisans: Vec<Artisan> = load_fixture(&dir.join("artisans.json"))?;
        let orders: Vec<Order> = load_fixture(&dir.join("orders.json"))?;

        tracing::info!(
            products = products.len(),
            artisans = artisans.len(),
            orders = orders.len(),
            dir = %dir.display(),
            "Catalog loaded"
        );

        Ok(Self::new(products, artisans, orders))
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Products matching every supplied filter, in fixture order.
    #[must_use]
    pub fn products(&self, filter: &ProductFilter) -> Vec<&Product> {
        let matches = self.products.iter().filter(|p| {
            filter
                .category
                .as_deref()
                .is_none_or(|c| p.category.eq_ignore_ascii_case(c))
                && filter
                    .artisan_id
                    .as_deref()
                    .is_none_or(|a| p.artisan_id == *a)
        });
        apply_limit(matches, filter.limit)
    }

    /// Look up a product by ID or slug.
    #[must_use]
    pub fn product(&self, key: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.matches_key(key))
    }

    /// Every product, in fixture order.
    #[must_use]
    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    // =========================================================================
    // Artisans
    // =========================================================================

    /// Every artisan, in fixture order.
    #[must_use]
    pub fn artisans(&self) -> &[Artisan] {
        &self.artisans
    }

    /// Look up an artisan by ID.
    #[must_use]
    pub fn artisan(&self, id: &str) -> Option<&Artisan> {
        self.artisans.iter().find(|a| a.id == *id)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Orders matching every supplied filter, newest first.
    ///
    /// Truncation happens before sorting, so `limit` keeps the first
    /// matches in fixture order and then orders them by date.
    #[must_use]
    pub fn orders(&self, filter: &OrderFilter) -> Vec<&Order> {
        let matches = self.orders.iter().filter(|o| {
            filter
                .status
                .as_deref()
                .is_none_or(|s| o.status.as_str().eq_ignore_ascii_case(s.trim()))
                && filter
                    .product_id
                    .as_deref()
                    .is_none_or(|id| o.product_id == *id)
        });
        let mut orders = apply_limit(matches, filter.limit);
        sort_newest_first(&mut orders);
        orders
    }

    /// Look up an order by ID.
    #[must_use]
    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == *id)
    }

    /// Every order, in fixture order.
    #[must_use]
    pub fn all_orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders placed for any product owned by `artisan_id`.
    #[must_use]
    pub fn orders_for_artisan(&self, artisan_id: &ArtisanId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| {
                self.product(o.product_id.as_str())
                    .is_some_and(|p| p.artisan_id == *artisan_id)
            })
            .collect()
    }
}

/// Parse a `limit` query value from its leading integer, so `2.5` and
/// `3abc` read as 2 and 3. Only positive values yield a limit.
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    let s = raw?.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let n: usize = digits.get(..end)?.parse().ok()?;

    (!negative && n > 0).then_some(n)
}

/// Sort orders newest-first. Orders with unparseable dates go last.
pub fn sort_newest_first(orders: &mut [&Order]) {
    orders.sort_by(|a, b| b.ordered_at_utc().cmp(&a.ordered_at_utc()));
}

fn apply_limit<'a, T: 'a>(items: impl Iterator<Item = &'a T>, limit: Option<usize>) -> Vec<&'a T> {
    match limit {
        Some(n) => items.take(n).collect(),
        None => items.collect(),
    }
}

fn load_fixture<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use artisan_hub_core::{CurrencyCode, OrderId, OrderStatus, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    pub(crate) fn product(id: &str, category: &str, artisan: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            slug: format!("{id}-slug"),
            short_description: "Short".to_string(),
            long_description: "Long".to_string(),
            price: Decimal::new(1000, 0),
            currency: CurrencyCode::INR,
            images: vec![format!("/images/{id}.jpg")],
            artisan_id: ArtisanId::new(artisan),
            category: category.to_string(),
            stock: 10,
            created_at: "2025-01-01".to_string(),
        }
    }

    pub(crate) fn order(id: &str, product: &str, status: OrderStatus, at: &str) -> Order {
        Order {
            id: OrderId::new(id),
            product_id: ProductId::new(product),
            product_title: None,
            buyer: "Buyer".to_string(),
            amount: Decimal::new(500, 0),
            currency: CurrencyCode::INR,
            status,
            ordered_at: at.to_string(),
        }
    }

    pub(crate) fn sample() -> Catalog {
        Catalog::new(
            vec![
                product("p1", "Pottery", "a1"),
                product("p2", "Textiles", "a2"),
                product("p3", "Pottery", "a2"),
                product("p4", "pottery", "a1"),
            ],
            Vec::new(),
            vec![
                order("o1", "p1", OrderStatus::Delivered, "2025-01-05T10:00:00Z"),
                order("o2", "p2", OrderStatus::Pending, "2025-03-01T10:00:00Z"),
                order("o3", "p1", OrderStatus::Shipped, "2025-02-01T10:00:00Z"),
                order("o4", "p3", OrderStatus::Delivered, "not a date"),
            ],
        )
    }

    fn ids<T>(items: &[&T], id: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|item| id(item).to_string()).collect()
    }

    #[test]
    fn test_no_filter_is_identity() {
        let catalog = sample();
        let products = catalog.products(&ProductFilter::default());
        assert_eq!(ids(&products, |p| p.id.as_str()), ["p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_category_filter_is_case_insensitive_and_ordered() {
        let catalog = sample();
        let filter = ProductFilter {
            category: Some("POTTERY".to_string()),
            ..Default::default()
        };
        let products = catalog.products(&filter);
        assert_eq!(ids(&products, |p| p.id.as_str()), ["p1", "p3", "p4"]);
    }

    #[test]
    fn test_filters_combine() {
        let catalog = sample();
        let filter = ProductFilter {
            category: Some("Pottery".to_string()),
            artisan_id: Some("a2".to_string()),
            limit: None,
        };
        let products = catalog.products(&filter);
        assert_eq!(ids(&products, |p| p.id.as_str()), ["p3"]);
    }

    #[test]
    fn test_limit_keeps_first_matches() {
        let catalog = sample();
        let filter = ProductFilter {
            category: Some("Pottery".to_string()),
            limit: Some(1),
            ..Default::default()
        };
        let products = catalog.products(&filter);
        assert_eq!(ids(&products, |p| p.id.as_str()), ["p1"]);
    }

    #[test]
    fn test_parse_limit_only_accepts_positive_integers() {
        assert_eq!(parse_limit(Some("3")), Some(3));
        assert_eq!(parse_limit(Some(" 2 ")), Some(2));
        assert_eq!(parse_limit(Some("0")), None);
        assert_eq!(parse_limit(Some("-4")), None);
        assert_eq!(parse_limit(Some("ten")), None);
        assert_eq!(parse_limit(Some("")), None);
        assert_eq!(parse_limit(None), None);
    }

    #[test]
    fn test_parse_limit_reads_leading_integer() {
        assert_eq!(parse_limit(Some("2.5")), Some(2));
        assert_eq!(parse_limit(Some("3abc")), Some(3));
        assert_eq!(parse_limit(Some("+4")), Some(4));
        assert_eq!(parse_limit(Some("-2.5")), None);
        assert_eq!(parse_limit(Some("0.9")), None);
    }

    #[test]
    fn test_product_lookup_by_id_or_slug() {
        let catalog = sample();
        assert_eq!(catalog.product("p2").map(|p| p.id.as_str()), Some("p2"));
        assert_eq!(catalog.product("p3-slug").map(|p| p.id.as_str()), Some("p3"));
        assert!(catalog.product("missing").is_none());
    }

    #[test]
    fn test_orders_sorted_newest_first_with_undated_last() {
        let catalog = sample();
        let orders = catalog.orders(&OrderFilter::default());
        assert_eq!(ids(&orders, |o| o.id.as_str()), ["o2", "o3", "o1", "o4"]);
    }

    #[test]
    fn test_order_limit_applies_before_sort() {
        let catalog = sample();
        let filter = OrderFilter {
            limit: Some(3),
            ..Default::default()
        };
        let orders = catalog.orders(&filter);
        assert_eq!(ids(&orders, |o| o.id.as_str()), ["o2", "o3", "o1"]);
    }

    #[test]
    fn test_order_filters() {
        let catalog = sample();
        let filter = OrderFilter {
            status: Some("delivered".to_string()),
            product_id: Some("p1".to_string()),
            limit: None,
        };
        let orders = catalog.orders(&filter);
        assert_eq!(ids(&orders, |o| o.id.as_str()), ["o1"]);
    }

    #[test]
    fn test_orders_for_artisan() {
        let catalog = sample();
        let orders = catalog.orders_for_artisan(&ArtisanId::new("a2"));
        assert_eq!(ids(&orders, |o| o.id.as_str()), ["o2", "o4"]);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Catalog::load(dir.path()).expect_err("no fixtures");
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("products.json"));
    }

    #[test]
    fn test_load_reports_invalid_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("products.json"), "[{\"id\": 1}]").expect("write");
        let err = Catalog::load(dir.path()).expect_err("bad fixture");
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[test]
    fn test_load_repository_fixtures() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let catalog = Catalog::load(&dir).expect("fixtures load");
        assert!(!catalog.all_products().is_empty());
        assert!(!catalog.artisans().is_empty());
        assert!(!catalog.all_orders().is_empty());
    }
}
