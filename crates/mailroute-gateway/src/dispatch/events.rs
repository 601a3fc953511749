//! Policy events -> tracing, gated by the document's logging flags.

use mailroute_core::policy::{LoggingFlags, PolicyEvent};
use mailroute_core::MessageEnvelope;

const REDACTED: &str = "-";

pub(crate) fn emit_events(msg: &MessageEnvelope, flags: LoggingFlags, events: &[PolicyEvent]) {
    let from = if flags.log_sender_domain { msg.from.as_str() } else { REDACTED };
    let subject = if flags.log_subject { msg.subject() } else { REDACTED };
    let to = msg.to.as_str();

    tracing::debug!(%to, %from, %subject, "evaluating routing policy");

    for event in events {
        match event {
            PolicyEvent::Disabled => tracing::info!(%to, "routing disabled for recipient"),
            PolicyEvent::SenderParsed { domain } => {
                let domain = if flags.log_sender_domain { domain.as_str() } else { REDACTED };
                tracing::debug!(%to, %domain, "parsed sender");
            }
            PolicyEvent::AllowListSkipped => tracing::debug!(%to, "allow-list empty, skipped"),
            PolicyEvent::AllowedByDomain { rule } => {
                tracing::debug!(%to, %from, %rule, "sender allowed by domain")
            }
            PolicyEvent::AllowedByEmail => tracing::debug!(%to, %from, "sender allowed by email"),
            PolicyEvent::NotAllowed => tracing::warn!(%to, %from, "sender not allowed"),
            PolicyEvent::DeniedByDomain { rule } => {
                tracing::warn!(%to, %from, %rule, "sender denied by domain")
            }
            PolicyEvent::DeniedByEmail => tracing::warn!(%to, %from, "sender denied by email"),
            PolicyEvent::FilterRuleSkipped { index } => {
                tracing::warn!(%to, index = *index, "filter rule without pattern skipped")
            }
            PolicyEvent::FilterMatched { pattern, action } => {
                tracing::info!(%to, %subject, %pattern, %action, "subject matched filter")
            }
            PolicyEvent::Forwarding { addresses } => {
                tracing::debug!(%to, forward_to = %addresses.join(", "), "forwarding")
            }
            PolicyEvent::NoForwardAddress => tracing::warn!(%to, "no forwarding address configured"),
        }
    }
}
