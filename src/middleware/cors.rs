//! CORS policy for browser clients.
//!
//! Policy:
//! - Origins come from `FRONTEND_URL` (comma-separated, exact match).
//! - Credentials are allowed: the session cookie is one of the two credential
//!   transports, so browsers must be permitted to send it cross-origin.
//! - `Origin: null` (file:// pages, sandboxed frames) is accepted only when
//!   `allow_null_origin` is set (implied outside production).
//! - Requests without an Origin header are not CORS requests and pass untouched.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;

/// Apply CORS policy to the given Router.
///
/// IMPORTANT:
/// - Never combine a wildcard origin with `allow_credentials(true)`.
pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(&config.cors_allowed_origins, config.allow_null_origin))
}

fn layer(origins: &[String], allow_null_origin: bool) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
        (allow_null_origin && origin == "null") || allowed.iter().any(|v| v == origin)
    });

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(60 * 10))
}
