//! CORS policy for browser clients.
//!
//! Note:
//! - CORS is enforced by browsers. Native clients are not restricted by CORS.
//! - Preflight (`OPTIONS`) is answered here and is exempt from the CSRF guard anyway.
//!
//! Policy:
//! - The CSRF header is allowed on requests and exposed on responses, otherwise
//!   browser scripts can neither read the issued token nor send it back.
//! - Development: permissive (Allow-Origin: *), WITHOUT credentials.
//! - Production: allowlist origins from Config, WITH credentials (the cookie carrier
//!   must travel on cross-origin requests).

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

/// Apply CORS policy to the given Router.
///
/// IMPORTANT:
/// - Do not combine wildcard origin (`Any`) with `allow_credentials(true)`.
pub fn apply(router: Router, config: &Config, csrf_header: &HeaderName) -> Router {
    let cors = if config.app_env.is_production() {
        // An empty allowlist allows none (no CORS headers).
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        });

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_credentials(true)
    } else {
        CorsLayer::new().allow_origin(Any)
    }
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static("x-request-id"),
        csrf_header.clone(),
    ])
    .expose_headers([csrf_header.clone()])
    .max_age(std::time::Duration::from_secs(60 * 10));

    router.layer(cors)
}
