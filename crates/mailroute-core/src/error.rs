//! Shared error type across mailroute crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// No policy document stored for the recipient.
    NotConfigured,
    /// Stored policy document is not usable JSON.
    MalformedDocument,
    /// Invalid input / malformed request.
    BadRequest,
    /// Auth failed.
    AuthFailed,
    /// Requested key does not exist.
    NotFound,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error (store failures included).
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::NotConfigured => "NOT_CONFIGURED",
            ClientCode::MalformedDocument => "MALFORMED_DOCUMENT",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MailRouteError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MailRouteError {
    #[error("no route defined for {0}")]
    NotConfigured(String),
    #[error("malformed policy document: {0}")]
    MalformedDocument(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("not found")]
    NotFound,
    #[error("store: {0}")]
    Store(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MailRouteError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MailRouteError::NotConfigured(_) => ClientCode::NotConfigured,
            MailRouteError::MalformedDocument(_) => ClientCode::MalformedDocument,
            MailRouteError::BadRequest(_) => ClientCode::BadRequest,
            MailRouteError::AuthFailed => ClientCode::AuthFailed,
            MailRouteError::NotFound => ClientCode::NotFound,
            MailRouteError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MailRouteError::Store(_) | MailRouteError::Internal(_) => ClientCode::Internal,
        }
    }
}
