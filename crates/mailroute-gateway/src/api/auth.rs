//! Bearer token check for management and routing requests.
//!
//! Applied as a layer over the protected routes, so it runs before method
//! routing: an unauthenticated request gets 401 even for a method the path
//! does not support.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use mailroute_core::error::{MailRouteError, Result};

use super::ApiError;
use crate::app_state::AppState;

/// `Authorization` must equal `Bearer <token>` exactly. Without a
/// configured token nothing is authorized.
pub fn is_authorized(headers: &HeaderMap, expected: Option<&str>) -> bool {
    let Some(expected) = expected else {
        tracing::warn!("no API token configured");
        return false;
    };
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    auth.strip_prefix("Bearer ") == Some(expected)
}

pub fn require_auth(state: &AppState, headers: &HeaderMap) -> Result<()> {
    if is_authorized(headers, state.api_token()) {
        return Ok(());
    }
    state.metrics().auth_failures.inc(&[]);
    Err(MailRouteError::AuthFailed)
}

pub async fn require_bearer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if let Err(e) = require_auth(&state, req.headers()) {
        return ApiError(e).into_response();
    }
    next.run(req).await
}
