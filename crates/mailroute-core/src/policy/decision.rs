//! Terminal routing decisions.

use serde::{Serialize, Serializer};

/// Why a message was rejected. `as_str` is the literal text handed back to
/// the sending MTA; nothing else about the policy is disclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Disabled,
    SenderNotAllowed,
    SenderDenied,
    Filtered,
    NoForwardAddress,
    NoRoute,
    InvalidConfig,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::Disabled => "Service disabled",
            RejectReason::SenderNotAllowed => "Sender not allowed",
            RejectReason::SenderDenied => "Sender denied",
            RejectReason::Filtered => "Filtered email",
            RejectReason::NoForwardAddress => "No forwarding address configured",
            RejectReason::NoRoute => "No route defined",
            RejectReason::InvalidConfig => "Invalid routing config",
        }
    }

    /// Short label for metrics.
    pub fn label(self) -> &'static str {
        match self {
            RejectReason::Disabled => "disabled",
            RejectReason::SenderNotAllowed => "not_allowed",
            RejectReason::SenderDenied => "denied",
            RejectReason::Filtered => "filtered",
            RejectReason::NoForwardAddress => "no_forward",
            RejectReason::NoRoute => "no_route",
            RejectReason::InvalidConfig => "invalid_config",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RejectReason {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(self.as_str())
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    Forward { forward_to: Vec<String> },
    Reject { reason: RejectReason },
}

impl Decision {
    pub fn reject(reason: RejectReason) -> Self {
        Decision::Reject { reason }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            Decision::Forward { .. } => "forward",
            Decision::Reject { .. } => "reject",
        }
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Decision::Reject { reason } => Some(*reason),
            Decision::Forward { .. } => None,
        }
    }
}
