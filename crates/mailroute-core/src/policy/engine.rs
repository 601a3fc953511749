use super::decision::{Decision, RejectReason};
use super::document::{FilterAction, PolicyDocument};
use super::matcher::{compile_domain_rules, find_domain, is_email_listed, sender_domain, DomainRule};
use crate::protocol::envelope::MessageEnvelope;

/// Observability record produced during evaluation, in order.
///
/// The engine never writes output itself; the caller decides whether and
/// how to emit these (see the document's `logging` flags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyEvent {
    Disabled,
    SenderParsed { domain: String },
    AllowListSkipped,
    AllowedByDomain { rule: String },
    AllowedByEmail,
    NotAllowed,
    DeniedByDomain { rule: String },
    DeniedByEmail,
    FilterRuleSkipped { index: usize },
    FilterMatched { pattern: String, action: String },
    Forwarding { addresses: Vec<String> },
    NoForwardAddress,
}

/// Decision plus the events that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub decision: Decision,
    pub events: Vec<PolicyEvent>,
}

/// Document compiled for one evaluation: effective allow set (with
/// `site_origin` injected) and wildcard rules built once.
struct CompiledPolicy<'a> {
    doc: &'a PolicyDocument,
    allow_domains: Vec<DomainRule>,
    deny_domains: Vec<DomainRule>,
}

impl<'a> CompiledPolicy<'a> {
    fn new(doc: &'a PolicyDocument) -> Self {
        let mut allow: Vec<&str> = doc.allow.domain_names().collect();
        if !doc.site_origin.is_empty() && !allow.contains(&doc.site_origin.as_str()) {
            allow.push(&doc.site_origin);
        }
        Self {
            doc,
            allow_domains: compile_domain_rules(allow),
            deny_domains: compile_domain_rules(doc.deny.domain_names()),
        }
    }

    fn allow_list_empty(&self) -> bool {
        self.allow_domains.is_empty() && self.doc.allow.email_names().next().is_none()
    }

    fn check_allow(&self, sender: &str, domain: &str, events: &mut Vec<PolicyEvent>) -> bool {
        if self.allow_list_empty() {
            events.push(PolicyEvent::AllowListSkipped);
            return true;
        }
        if is_email_listed(self.doc.allow.email_names(), sender) {
            events.push(PolicyEvent::AllowedByEmail);
            return true;
        }
        if let Some(rule) = find_domain(&self.allow_domains, domain) {
            events.push(PolicyEvent::AllowedByDomain {
                rule: rule.raw().to_string(),
            });
            return true;
        }
        events.push(PolicyEvent::NotAllowed);
        false
    }

    fn check_deny(&self, sender: &str, domain: &str, events: &mut Vec<PolicyEvent>) -> bool {
        if let Some(rule) = find_domain(&self.deny_domains, domain) {
            events.push(PolicyEvent::DeniedByDomain {
                rule: rule.raw().to_string(),
            });
            return true;
        }
        if is_email_listed(self.doc.deny.email_names(), sender) {
            events.push(PolicyEvent::DeniedByEmail);
            return true;
        }
        false
    }

    /// First rule whose pattern occurs in the subject with action `reject`.
    fn check_filters(&self, subject: &str, events: &mut Vec<PolicyEvent>) -> bool {
        let subject = subject.to_lowercase();
        for (index, rule) in self.doc.filtering.iter().enumerate() {
            let Some(pattern) = rule.pattern() else {
                events.push(PolicyEvent::FilterRuleSkipped { index });
                continue;
            };
            if !subject.contains(&pattern.to_lowercase()) {
                continue;
            }
            let action = rule.action();
            events.push(PolicyEvent::FilterMatched {
                pattern: pattern.to_string(),
                action: action.as_ref().map(|a| a.as_str().to_string()).unwrap_or_default(),
            });
            match action {
                Some(FilterAction::Reject) => return true,
                // reserved actions: matched, no effect yet
                Some(FilterAction::Reserved(_)) | None => {}
            }
        }
        false
    }
}

/// Decide what happens to `msg` under `doc`.
///
/// Pure and total. Checks run in a fixed order and the first one that
/// rejects wins: enabled, allow-list, deny-list, subject filters, then
/// forwarding.
pub fn evaluate(doc: &PolicyDocument, msg: &MessageEnvelope) -> Evaluation {
    let mut events = Vec::new();
    let decision = decide(doc, msg, &mut events);
    Evaluation { decision, events }
}

fn decide(doc: &PolicyDocument, msg: &MessageEnvelope, events: &mut Vec<PolicyEvent>) -> Decision {
    let policy = CompiledPolicy::new(doc);

    if !doc.enabled {
        events.push(PolicyEvent::Disabled);
        return Decision::reject(RejectReason::Disabled);
    }

    let sender = msg.from.as_str();
    let domain = sender_domain(sender);
    events.push(PolicyEvent::SenderParsed {
        domain: domain.clone(),
    });

    if !policy.check_allow(sender, &domain, events) {
        return Decision::reject(RejectReason::SenderNotAllowed);
    }

    if policy.check_deny(sender, &domain, events) {
        return Decision::reject(RejectReason::SenderDenied);
    }

    if policy.check_filters(msg.subject(), events) {
        return Decision::reject(RejectReason::Filtered);
    }

    let addresses = doc.forward_to.addresses();
    if addresses.is_empty() {
        events.push(PolicyEvent::NoForwardAddress);
        return Decision::reject(RejectReason::NoForwardAddress);
    }
    events.push(PolicyEvent::Forwarding {
        addresses: addresses.clone(),
    });
    Decision::Forward {
        forward_to: addresses,
    }
}
