//! Policy layer (document defaults, sender matching, evaluation).
//!
//! A stored document is merged into a complete `PolicyDocument`, then
//! evaluated against one message envelope to reach a terminal `Decision`.

pub mod decision;
pub mod document;
pub mod engine;
pub mod matcher;

pub use decision::{Decision, RejectReason};
pub use document::{
    merge_defaults, merge_defaults_at, FilterAction, FilterRule, ForwardTo, ListRules,
    LoggingFlags, PolicyDocument,
};
pub use engine::{evaluate, Evaluation, PolicyEvent};
