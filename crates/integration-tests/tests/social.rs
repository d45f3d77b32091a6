//! Social post generation, share links and analytics.

use artisan_hub_core::{PostPlatform, SharePlatform};
use artisan_hub_integration_tests::TestApp;
use axum::http::StatusCode;
use serde_json::{Value, json};

const PRODUCT_URL: &str = "https://shop.example.com/products/blue vase?ref=share&x=1";

async fn share(app: &TestApp, body: Value) -> (StatusCode, Value) {
    let response = app.post_json("/api/social/share", &body).await;
    (response.status, response.json())
}

// ============================================================================
// Share links
// ============================================================================

#[tokio::test]
async fn test_share_links_are_percent_encoded() {
    let app = TestApp::new();
    let encoded = urlencoding::encode(PRODUCT_URL).into_owned();

    for platform in ["facebook", "twitter", "linkedin", "pinterest"] {
        let (status, body) = share(
            &app,
            json!({ "postId": "post_1", "platform": platform, "productUrl": PRODUCT_URL }),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{platform}");
        assert_eq!(body["platform"], platform);
        let url = body["shareUrl"].as_str().expect("share url");
        assert!(url.contains(&encoded), "{platform}: {url}");
        assert!(!url.contains(' '), "{platform}: {url}");
        assert!(body.get("instructions").is_none());
    }
}

#[tokio::test]
async fn test_whatsapp_link_carries_custom_message() {
    let app = TestApp::new();
    let (_, body) = share(
        &app,
        json!({
            "postId": "post_1",
            "platform": "WhatsApp",
            "productUrl": "https://shop.example.com/p/1",
            "customMessage": "Look & buy",
        }),
    )
    .await;

    let url = body["shareUrl"].as_str().expect("share url");
    assert!(url.starts_with("https://wa.me/?text="));
    assert!(url.contains("Look%20%26%20buy"));
    assert_eq!(body["platform"], "whatsapp");
}

#[tokio::test]
async fn test_share_defaults_to_product_page_of_post() {
    let app = TestApp::new();
    let (_, body) = share(&app, json!({ "postId": "post_42", "platform": "linkedin" })).await;

    let url = body["shareUrl"].as_str().expect("share url");
    assert!(url.contains("%2Fproducts%2Fpost_42"), "{url}");
}

#[tokio::test]
async fn test_instagram_share_returns_manual_instructions() {
    let app = TestApp::new();
    let (status, body) = share(
        &app,
        json!({ "postId": "post_1", "platform": "instagram", "productUrl": PRODUCT_URL }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["shareUrl"].is_null());
    assert_eq!(body["instructions"]["method"], "manual");
    assert_eq!(body["instructions"]["steps"].as_array().map(Vec::len), Some(6));
    assert!(body["instructions"]["caption"].is_string());
}

#[tokio::test]
async fn test_share_unsupported_platform_lists_alternatives() {
    let app = TestApp::new();
    let (status, body) = share(&app, json!({ "postId": "post_1", "platform": "myspace" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unsupported platform");
    assert_eq!(body["supportedPlatforms"], json!(SharePlatform::supported_names()));
    assert!(
        body["supportedPlatforms"]
            .as_array()
            .is_some_and(|p| p.contains(&json!("instagram")))
    );
}

#[tokio::test]
async fn test_share_requires_post_and_platform() {
    let app = TestApp::new();
    for body in [
        json!({ "platform": "facebook" }),
        json!({ "postId": "post_1" }),
        json!({ "postId": "", "platform": "facebook" }),
        json!({ "postId": "post_1", "platform": "  " }),
    ] {
        let (status, body) = share(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Post ID and platform are required");
    }
}

// ============================================================================
// Post generation
// ============================================================================

#[tokio::test]
async fn test_generate_posts_for_known_product() {
    let app = TestApp::new();
    let response = app
        .post_json(
            "/api/social/generate",
            &json!({ "productId": "prod_003", "platforms": ["facebook", "twitter", "tiktok"] }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["productId"], "prod_003");

    let posts = body["posts"].as_object().expect("posts");
    let platforms: Vec<_> = posts.keys().map(String::as_str).collect();
    assert_eq!(platforms, ["facebook", "twitter"]);

    let facebook = &posts["facebook"];
    assert!(
        facebook["shareUrl"]
            .as_str()
            .is_some_and(|u| u.contains("banarasi-silk-stole"))
    );
    assert!(facebook["id"].is_string());
    assert!(body["expiresAt"].is_string());
}

#[tokio::test]
async fn test_generate_instagram_post_has_no_link() {
    let app = TestApp::new();
    let body = app
        .post_json(
            "/api/social/generate",
            &json!({ "productId": "prod_unknown", "platforms": ["instagram"] }),
        )
        .await
        .json();

    let post = &body["posts"]["instagram"];
    assert!(post["shareUrl"].is_null());
    assert_eq!(post["content"]["hashtags"].as_array().map(Vec::len), Some(6));
    assert_eq!(post["instructions"]["steps"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn test_generate_without_valid_platforms_is_400() {
    let app = TestApp::new();
    let response = app
        .post_json(
            "/api/social/generate",
            &json!({ "productId": "prod_001", "platforms": ["tiktok", "myspace"] }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["error"], "No valid platforms specified");
    assert_eq!(
        body["supportedPlatforms"],
        json!(PostPlatform::supported_names())
    );
}

#[tokio::test]
async fn test_generate_requires_product_and_platforms() {
    let app = TestApp::new();
    for body in [
        json!({ "productId": "prod_001" }),
        json!({ "productId": "", "platforms": ["facebook"] }),
        json!({ "platforms": ["facebook"] }),
    ] {
        let response = app.post_json("/api/social/generate", &body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(
            response.json()["error"],
            "Product ID and platforms array are required"
        );
    }
}

// ============================================================================
// Analytics
// ============================================================================

#[tokio::test]
async fn test_analytics_placeholder() {
    let app = TestApp::new();
    let response = app.get("/api/social/analytics/prod_001").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["productId"], "prod_001");
    assert!(body["analytics"]["totalShares"].as_u64().is_some_and(|n| n < 100));
    assert_eq!(body["analytics"]["platforms"].as_object().map(|p| p.len()), Some(4));
    assert!(body["lastUpdated"].is_string());
}
