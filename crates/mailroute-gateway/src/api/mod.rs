//! HTTP surface: policy management and inbound routing.
//!
//! Every route here sits behind the bearer check in `auth`.

pub mod auth;
pub mod email;
pub mod error;
pub mod route;

pub use error::ApiError;
