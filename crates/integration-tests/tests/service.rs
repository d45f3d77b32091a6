//! Service banner, health, fallback and cross-cutting middleware.

use artisan_hub_integration_tests::TestApp;
use artisan_hub_server::middleware::REQUEST_ID_HEADER;
use artisan_hub_server::routes::{AVAILABLE_ENDPOINTS, VERSION};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;

#[tokio::test]
async fn test_root_banner() {
    let app = TestApp::new();
    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({
            "message": "Artisan Hub API",
            "version": VERSION,
            "endpoints": AVAILABLE_ENDPOINTS,
        })
    );
}

#[tokio::test]
async fn test_health_on_both_paths() {
    let app = TestApp::new();
    for path in ["/health", "/api/health"] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");

        let body = response.json();
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], "Artisan Hub API is running");
        assert_eq!(body["version"], VERSION);
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_unknown_route_lists_endpoints() {
    let app = TestApp::new();
    let response = app.get("/api/unicorns").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json(),
        json!({
            "error": "Not Found",
            "message": "Route /api/unicorns not found",
            "availableEndpoints": AVAILABLE_ENDPOINTS,
        })
    );
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();
    let request = Request::get("/health")
        .header(REQUEST_ID_HEADER, "req-abc-123")
        .body(Body::empty())
        .expect("request");

    let response = app.send(request).await;
    assert_eq!(response.headers[REQUEST_ID_HEADER], "req-abc-123");
}

#[tokio::test]
async fn test_request_id_is_minted_when_absent() {
    let app = TestApp::new();
    let response = app.get("/api/products").await;

    let id = response.headers[REQUEST_ID_HEADER]
        .to_str()
        .expect("ascii id");
    assert!(uuid_like(id), "{id}");
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = TestApp::new();
    for path in ["/health", "/api/unicorns"] {
        let response = app.get(path).await;
        let headers = &response.headers;

        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY", "{path}");
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::REFERRER_POLICY], "no-referrer");
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
    }
}

#[tokio::test]
async fn test_cors_allows_storefront_origin() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/products")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .expect("request");

    let response = app.send(request).await;
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = TestApp::new();
    let request = Request::post("/api/ai/translate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .expect("request");

    let response = app.send(request).await;
    assert!(response.status.is_client_error());
}

fn uuid_like(id: &str) -> bool {
    id.len() == 36 && id.chars().filter(|&c| c == '-').count() == 4
}
