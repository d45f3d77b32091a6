//! Order handlers.

use artisan_hub_core::Order;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{OrderFilter, parse_limit};
use crate::error::{AppError, Result};
use crate::state::AppState;

use super::{ItemResponse, ListResponse, blank_as_none};

/// Build the order router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(index))
        .route("/api/orders/{id}", get(show))
}

/// Order listing query.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub product_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<String>,
}

/// List orders matching the query, newest first.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Json<ListResponse<Order, OrderQuery>> {
    let filter = OrderFilter {
        status: query.status.clone(),
        product_id: query.product_id.clone(),
        limit: parse_limit(query.limit.as_deref()),
    };
    let orders = state.catalog().orders(&filter);
    Json(ListResponse::new(orders.into_iter().cloned().collect(), query))
}

/// Show an order by ID.
///
/// # Errors
///
/// Returns 404 for an unknown order.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse<Order>>> {
    state
        .catalog()
        .order(&id)
        .cloned()
        .map(|o| Json(ItemResponse::new(o)))
        .ok_or(AppError::NotFound("Order"))
}
