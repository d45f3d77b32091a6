//! Product catalog handlers.

use artisan_hub_core::Product;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{ProductFilter, parse_limit};
use crate::error::{AppError, Result};
use crate::state::AppState;

use super::{ItemResponse, ListResponse, blank_as_none};

/// Build the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(index))
        .route("/api/products/{key}", get(show))
}

/// Product listing query. `limit` is kept raw so it can be echoed back.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub artisan_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<String>,
}

impl ProductQuery {
    pub(crate) fn filter(&self) -> ProductFilter {
        ProductFilter {
            category: self.category.clone(),
            artisan_id: self.artisan_id.clone(),
            limit: parse_limit(self.limit.as_deref()),
        }
    }
}

/// List products matching the query.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<ListResponse<Product, ProductQuery>> {
    let products = state.catalog().products(&query.filter());
    Json(ListResponse::new(products.into_iter().cloned().collect(), query))
}

/// Show a product by ID or slug.
///
/// # Errors
///
/// Returns 404 when no product has that ID or slug.
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ItemResponse<Product>>> {
    state
        .catalog()
        .product(&key)
        .cloned()
        .map(|p| Json(ItemResponse::new(p)))
        .ok_or(AppError::NotFound("Product"))
}
