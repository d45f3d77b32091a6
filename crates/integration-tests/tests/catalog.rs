//! Catalog, artisan, order and dashboard endpoints against the fixtures.

use artisan_hub_integration_tests::TestApp;
use axum::http::StatusCode;
use serde_json::{Value, json};

fn ids(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|item| item["id"].as_str().expect("id"))
        .collect()
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_products_unfiltered_lists_everything() {
    let app = TestApp::new();
    let response = app.get("/api/products").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 6);
    assert_eq!(
        body["filters"],
        json!({ "category": null, "artisanId": null, "limit": null })
    );
}

#[tokio::test]
async fn test_products_category_with_limit_returns_first_match() {
    let app = TestApp::new();
    let body = app.get("/api/products?category=Pottery&limit=1").await.json();

    assert_eq!(ids(&body), ["prod_001"]);
    assert_eq!(body["count"], 1);
    assert_eq!(body["filters"]["category"], "Pottery");
    assert_eq!(body["filters"]["limit"], "1");
}

#[tokio::test]
async fn test_products_category_is_case_insensitive() {
    let app = TestApp::new();
    let body = app.get("/api/products?category=pOTTERY").await.json();
    assert_eq!(ids(&body), ["prod_001", "prod_002"]);
}

#[tokio::test]
async fn test_products_artisan_filter_is_exact() {
    let app = TestApp::new();

    let body = app.get("/api/products?artisanId=art_003").await.json();
    assert_eq!(ids(&body), ["prod_004", "prod_006"]);

    let body = app.get("/api/products?artisanId=ART_003").await.json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_products_invalid_limit_is_ignored() {
    let app = TestApp::new();
    for limit in ["0", "-3", "abc"] {
        let body = app.get(&format!("/api/products?limit={limit}")).await.json();
        assert_eq!(body["count"], 6, "limit={limit}");
        assert_eq!(body["filters"]["limit"], limit);
    }
}

#[tokio::test]
async fn test_product_lookup_by_id_and_slug() {
    let app = TestApp::new();

    let by_id = app.get("/api/products/prod_003").await.json();
    assert_eq!(by_id["data"]["title"], "Banarasi Silk Stole");

    let by_slug = app.get("/api/products/banarasi-silk-stole").await.json();
    assert_eq!(by_slug["data"]["id"], "prod_003");
    assert_eq!(by_slug["data"]["price"], 4200.0);
    assert_eq!(by_slug["data"]["artisanId"], "art_002");
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let app = TestApp::new();
    let response = app.get("/api/products/prod_999").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json(),
        json!({ "success": false, "error": "Product not found" })
    );
}

// ============================================================================
// Artisans
// ============================================================================

#[tokio::test]
async fn test_artisans_list_has_no_filters() {
    let app = TestApp::new();
    let body = app.get("/api/artisans").await.json();

    assert_eq!(body["count"], 3);
    assert!(body.get("filters").is_none());
}

#[tokio::test]
async fn test_artisan_lookup_and_404() {
    let app = TestApp::new();

    let body = app.get("/api/artisans/art_001").await.json();
    assert_eq!(body["data"]["name"], "Meera Devi");

    let response = app.get("/api/artisans/art_404").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Artisan not found");
}

#[tokio::test]
async fn test_artisan_products() {
    let app = TestApp::new();

    let body = app.get("/api/artisans/art_002/products").await.json();
    assert_eq!(ids(&body), ["prod_003", "prod_005"]);
    assert_eq!(body["filters"]["artisanId"], "art_002");

    let response = app.get("/api/artisans/art_404/products").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_orders_sorted_newest_first() {
    let app = TestApp::new();
    let body = app.get("/api/orders").await.json();

    assert_eq!(
        ids(&body),
        [
            "ord_007", "ord_006", "ord_004", "ord_005", "ord_003", "ord_002", "ord_001"
        ]
    );
}

#[tokio::test]
async fn test_orders_status_filter_is_case_insensitive() {
    let app = TestApp::new();
    let body = app.get("/api/orders?status=DELIVERED").await.json();

    assert_eq!(ids(&body), ["ord_006", "ord_003", "ord_001"]);
    assert_eq!(body["filters"]["status"], "DELIVERED");
    assert!(body["filters"]["productId"].is_null());
}

#[tokio::test]
async fn test_orders_limit_applies_before_sorting() {
    let app = TestApp::new();
    let body = app.get("/api/orders?status=delivered&limit=2").await.json();

    // First two matches in fixture order, then newest first
    assert_eq!(ids(&body), ["ord_003", "ord_001"]);
}

#[tokio::test]
async fn test_orders_product_filter() {
    let app = TestApp::new();
    let body = app.get("/api/orders?productId=prod_001").await.json();
    assert_eq!(ids(&body), ["ord_005", "ord_001"]);
}

#[tokio::test]
async fn test_order_lookup_and_404() {
    let app = TestApp::new();

    let body = app.get("/api/orders/ord_002").await.json();
    assert_eq!(body["data"]["status"], "shipped");
    assert_eq!(body["data"]["buyer"], "Sophie Martin");

    let response = app.get("/api/orders/ord_999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Order not found");
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_summary() {
    let app = TestApp::new();
    let body = app.get("/api/dashboard").await.json();
    let data = &body["data"];

    assert_eq!(data["totalSales"], 14900.5);
    assert_eq!(data["totalOrders"], 7);
    assert_eq!(data["totalArtisans"], 3);
    assert_eq!(data["totalProducts"], 6);
    assert_eq!(data["lowStockProducts"], 2);
    assert_eq!(
        data["ordersByStatus"],
        json!({ "cancelled": 1, "delivered": 3, "pending": 2, "shipped": 1 })
    );
    assert_eq!(
        data["monthlySales"],
        json!([
            { "month": "2025-01", "value": 1850.0 },
            { "month": "2025-02", "value": 6100.0 },
            { "month": "2025-03", "value": 6950.5 },
        ])
    );

    let recent: Vec<_> = data["recentOrders"]
        .as_array()
        .expect("recent orders")
        .iter()
        .map(|o| o["id"].as_str().expect("id"))
        .collect();
    assert_eq!(recent, ["ord_007", "ord_006", "ord_004", "ord_005", "ord_003"]);
}

#[tokio::test]
async fn test_empty_product_filters_are_absent() {
    let app = TestApp::new();
    let body = app
        .get("/api/products?category=&artisanId=%20&limit=")
        .await
        .json();

    assert_eq!(body["count"], 6);
    assert_eq!(
        body["filters"],
        json!({ "category": null, "artisanId": null, "limit": null })
    );
}

#[tokio::test]
async fn test_empty_order_filters_are_absent() {
    let app = TestApp::new();
    let body = app.get("/api/orders?status=&productId=").await.json();

    assert_eq!(body["count"], 7);
    assert!(body["filters"]["status"].is_null());
    assert!(body["filters"]["productId"].is_null());
}

#[tokio::test]
async fn test_fractional_limit_uses_integer_part() {
    let app = TestApp::new();
    let body = app.get("/api/products?limit=2.5").await.json();
    assert_eq!(ids(&body), ["prod_001", "prod_002"]);
    assert_eq!(body["filters"]["limit"], "2.5");
}
