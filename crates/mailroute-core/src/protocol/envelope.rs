//! Inbound message envelope (JSON).

use serde::{Deserialize, Serialize};

/// Envelope fields of one inbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageEnvelope {
    /// Sender address.
    pub from: String,
    /// Recipient address, also the policy store key.
    pub to: String,
    /// Subject line; absent is treated as empty.
    #[serde(default)]
    pub subject: Option<String>,
}

impl MessageEnvelope {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("")
    }
}
