//! Policy management handlers (`/api/email/...`).
//!
//! Documents are stored as sent (compact JSON) and returned merged with
//! defaults. A stored value that no longer parses is returned as a raw
//! string so an operator can see and fix it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use mailroute_core::PolicyDocument;

use super::ApiError;
use crate::app_state::AppState;

/// One listed recipient.
#[derive(Debug, Serialize)]
pub struct EmailEntry {
    pub email: String,
    pub config: Value,
}

fn config_view(raw: Option<String>) -> Value {
    match raw {
        Some(raw) => match PolicyDocument::from_json(&raw) {
            Ok(doc) => doc.to_value(),
            Err(_) => Value::String(raw),
        },
        None => Value::Null,
    }
}

pub async fn list_emails(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmailEntry>>, ApiError> {
    state.metrics().api_requests.inc(&[("op", "list")]);

    let store = state.store();
    let mut out = Vec::new();
    for key in store.list().await? {
        let raw = store.get(&key.name).await?;
        out.push(EmailEntry {
            email: key.name,
            config: config_view(raw),
        });
    }
    Ok(Json(out))
}

pub async fn get_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.metrics().api_requests.inc(&[("op", "get")]);

    match state.store().get(&email).await? {
        Some(raw) => Ok(Json(config_view(Some(raw)))),
        None => Err(ApiError(mailroute_core::MailRouteError::NotFound)),
    }
}

pub async fn put_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), ApiError> {
    state.metrics().api_requests.inc(&[("op", "put")]);

    let Ok(doc) = serde_json::from_slice::<Value>(&body) else {
        return Ok((StatusCode::BAD_REQUEST, "Invalid JSON"));
    };
    state.store().put(&email, doc.to_string()).await?;
    tracing::info!(%email, "routing policy saved");
    Ok((StatusCode::OK, "Saved"))
}

pub async fn delete_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<(StatusCode, &'static str), ApiError> {
    state.metrics().api_requests.inc(&[("op", "delete")]);

    state.store().delete(&email).await?;
    tracing::info!(%email, "routing policy deleted");
    Ok((StatusCode::OK, "Deleted"))
}
