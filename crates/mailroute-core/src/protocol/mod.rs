//! Message-side wire types.
//!
//! The envelope is the only per-message input the engine sees; the body
//! never reaches the policy layer.

pub mod envelope;
