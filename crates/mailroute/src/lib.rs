//! Top-level facade crate for mailroute.
//!
//! Re-exports the policy engine and the gateway library so users can depend on a single crate.

pub mod core {
    pub use mailroute_core::*;
}

pub mod gateway {
    pub use mailroute_gateway::*;
}
