//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction)
//! 2. `TraceLayer` (request span with `request_id` field)
//! 3. Request ID (records the ID on the span)
//! 4. CORS
//! 5. Security headers
//! 6. Error detail (development only)

pub mod error_detail;
pub mod request_id;
pub mod security_headers;

pub use error_detail::error_detail_middleware;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
