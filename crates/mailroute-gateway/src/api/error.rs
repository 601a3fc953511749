//! Error -> HTTP response mapping (plain-text bodies).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use mailroute_core::error::{ClientCode, MailRouteError};

#[derive(Debug)]
pub struct ApiError(pub MailRouteError);

impl From<MailRouteError> for ApiError {
    fn from(e: MailRouteError) -> Self {
        ApiError(e)
    }
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest | ClientCode::MalformedDocument => StatusCode::BAD_REQUEST,
        ClientCode::AuthFailed => StatusCode::UNAUTHORIZED,
        ClientCode::NotFound | ClientCode::NotConfigured => StatusCode::NOT_FOUND,
        ClientCode::UnsupportedVersion | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let body = match code {
            ClientCode::AuthFailed => "Unauthorized".to_string(),
            ClientCode::NotFound => "Not found".to_string(),
            ClientCode::Internal => "Internal error".to_string(),
            _ => self.0.to_string(),
        };
        (status_for(code), body).into_response()
    }
}
