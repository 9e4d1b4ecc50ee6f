//! CSRF guard as an axum middleware.
//!
//! - Verifies the double-submit token before the handler runs (unsafe methods only).
//! - Attaches a fresh cookie + header pair to the handler's response.
//! - Any verification failure short-circuits with the uniform 500 from `AppError`.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::csrf::{CsrfOutcome, RequestContext};
use crate::error::AppError;
use crate::state::AppState;

/// Put the CSRF guard in front of every route of `router`.
///
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::csrf::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, csrf_middleware))
}

async fn csrf_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = req.into_parts();
    let ctx = RequestContext::from_parts(&parts);

    let issued = match state.csrf.evaluate(&ctx) {
        CsrfOutcome::Allow { issued } => issued,
        CsrfOutcome::Reject { reason } => {
            if reason.is_verification_failure() {
                tracing::warn!(
                    reason = %reason,
                    method = %parts.method,
                    path = ctx.path(),
                    "csrf verification failed"
                );
            } else {
                tracing::error!(error = %reason, "csrf token issuance failed");
            }
            return Err(reason.into());
        }
    };

    let mut response = next.run(Request::from_parts(parts, body)).await;

    if let Some(issued) = issued {
        issued.write_to(response.headers_mut());
    }

    Ok(response)
}
