//! Inbound routing endpoint for MTA integrations.
//!
//! `POST /v1/route` takes a message envelope and answers with the decision;
//! the caller performs the forward or reject.

use axum::{extract::State, Json};
use bytes::Bytes;

use mailroute_core::{Decision, MailRouteError, MessageEnvelope};

use super::ApiError;
use crate::app_state::AppState;

pub async fn route_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Decision>, ApiError> {
    let msg: MessageEnvelope = serde_json::from_slice(&body)
        .map_err(|e| MailRouteError::BadRequest(format!("invalid envelope: {e}")))?;
    let decision = state.dispatcher().route(&msg).await?;
    Ok(Json(decision))
}
