//! Axum router wiring.
//!
//! Management API under `/api/email`, inbound routing under `/v1/route`,
//! operational endpoints at the root.

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let email = get(api::email::get_email)
        .put(api::email::put_email)
        .delete(api::email::delete_email);

    // Auth wraps each method router, so it answers before a 405.
    let protected = Router::new()
        .route("/api/email/list", get(api::email::list_emails))
        .route("/api/email/:email", email.clone())
        .route("/api/email/:email/", email)
        .route("/v1/route", post(api::route::route_message))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth::require_bearer,
        ));

    Router::new()
        .merge(protected)
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
        .with_state(state)
}
