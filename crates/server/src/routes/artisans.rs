//! Artisan directory handlers.

use artisan_hub_core::{Artisan, Product};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::error::{AppError, Result};
use crate::state::AppState;

use super::products::ProductQuery;
use super::{ItemResponse, ListResponse};

/// Build the artisan router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/artisans", get(index))
        .route("/api/artisans/{id}", get(show))
        .route("/api/artisans/{id}/products", get(products))
}

/// List every artisan.
pub async fn index(State(state): State<AppState>) -> Json<ListResponse<Artisan>> {
    Json(ListResponse::unfiltered(state.catalog().artisans().to_vec()))
}

/// Show an artisan by ID.
///
/// # Errors
///
/// Returns 404 for an unknown artisan.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse<Artisan>>> {
    state
        .catalog()
        .artisan(&id)
        .cloned()
        .map(|a| Json(ItemResponse::new(a)))
        .ok_or(AppError::NotFound("Artisan"))
}

/// List the products of one artisan. `category` and `limit` still apply.
///
/// # Errors
///
/// Returns 404 for an unknown artisan.
pub async fn products(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(mut query): Query<ProductQuery>,
) -> Result<Json<ListResponse<Product, ProductQuery>>> {
    let catalog = state.catalog();
    if catalog.artisan(&id).is_none() {
        return Err(AppError::NotFound("Artisan"));
    }

    query.artisan_id = Some(id);
    let products = catalog.products(&query.filter());
    Ok(Json(ListResponse::new(
        products.into_iter().cloned().collect(),
        query,
    )))
}
