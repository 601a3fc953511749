//! Dispatcher module exports.
//!
//! Re-exports the dispatcher and the mail action trait so downstream
//! consumers (MTA integrations, the HTTP layer) can depend on this module
//! directly.

pub mod dispatcher;
mod events;

pub use dispatcher::{Dispatcher, MailAction};
