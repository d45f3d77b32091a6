//! Development-only exposure of internal error text.
//!
//! 5xx responses carry their raw error text as an [`ErrorDetail`] extension
//! and a generic `message` in the body. In development this middleware
//! replaces `message` with the raw text; in production the body is untouched.

use axum::{
    Json,
    body::{Body, to_bytes},
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::ErrorDetail;
use crate::state::AppState;

/// Upper bound on an error body read back for rewriting.
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

/// Swap the raw error text into `message` when running in development.
pub async fn error_detail_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if !state.config().environment.is_development() {
        return response;
    }
    let Some(ErrorDetail(detail)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    expose_detail(response, detail).await
}

async fn expose_detail(response: Response, detail: String) -> Response {
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "Could not read error body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(mut json) => {
            json["message"] = Value::String(detail);
            let mut rewritten = (parts.status, Json(json)).into_response();
            *rewritten.extensions_mut() = parts.extensions;
            rewritten
        }
        Err(_) => Response::from_parts(parts, Body::from(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, middleware, routing::get};
    use tower::ServiceExt;

    use super::*;
    use crate::audit::NoopAuditLog;
    use crate::catalog::Catalog;
    use crate::config::{Environment, ServerConfig};
    use crate::error::{AppError, GENERIC_ERROR_MESSAGE};
    use crate::state::Services;
    use crate::testing::{FixedGenerator, UnavailableCloud};

    fn app(environment: Environment) -> Router {
        let mut config = ServerConfig::development("data", "uploads");
        config.environment = environment;
        let cloud = Arc::new(UnavailableCloud);
        let state = AppState::from_parts(
            config,
            Catalog::default(),
            Services {
                generator: Arc::new(FixedGenerator::new("")),
                audit: Arc::new(NoopAuditLog),
                translator: cloud.clone(),
                speech: cloud.clone(),
                vision: cloud,
            },
        );

        Router::new()
            .route(
                "/boom",
                get(|| async { AppError::Internal("disk on fire".to_string()) }),
            )
            .route("/missing", get(|| async { AppError::NotFound("Product") }))
            .layer(middleware::from_fn_with_state(state.clone(), error_detail_middleware))
            .with_state(state)
    }

    async fn get_json(app: Router, uri: &str) -> Value {
        let request = Request::builder().uri(uri).body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("response");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn test_development_exposes_detail() {
        let body = get_json(app(Environment::Development), "/boom").await;
        assert_eq!(body["message"], "Internal error: disk on fire");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_production_keeps_generic_message() {
        let body = get_json(app(Environment::Production), "/boom").await;
        assert_eq!(body["message"], GENERIC_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_client_errors_pass_through() {
        let body = get_json(app(Environment::Development), "/missing").await;
        assert_eq!(body["error"], "Product not found");
        assert!(body.get("message").is_none());
    }
}
