//! mailroute core: per-recipient email routing policy.
//!
//! This crate holds the policy document schema, the defaulting merge that
//! turns a stored (possibly partial) document into a complete one, and the
//! evaluation engine that reaches a forward/reject decision for one message.
//! It performs no I/O and carries no transport or runtime dependencies, so
//! the gateway, tests and any MTA integration can share it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! A hand-edited or outdated document must never crash evaluation: merging
//! is total, and only unparseable JSON surfaces as `MailRouteError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod policy;
pub mod protocol;

/// Shared result type.
pub use error::{MailRouteError, Result};
pub use policy::{evaluate, merge_defaults, Decision, Evaluation, PolicyDocument, RejectReason};
pub use protocol::envelope::MessageEnvelope;
