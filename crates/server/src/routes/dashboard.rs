//! Seller dashboard handler.

use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};

use crate::services::dashboard::DashboardSummary;
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(summary))
}

/// Aggregate figures over the whole catalog.
pub async fn summary(State(state): State<AppState>) -> Json<Value> {
    let summary = DashboardSummary::compute(state.catalog());
    Json(json!({ "success": true, "data": summary }))
}
