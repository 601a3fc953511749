//! mailroute gateway library entry.
//!
//! This crate wires the config loader, policy store, dispatcher and HTTP
//! surface around the core policy engine. It is intended to be consumed by
//! the binary (`main.rs`), by MTA integrations and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
