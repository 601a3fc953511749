use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures_util::future::join_all;

use mailroute_core::error::Result;
use mailroute_core::policy::evaluate;
use mailroute_core::{Decision, MessageEnvelope, PolicyDocument, RejectReason};

use super::events::emit_events;
use crate::obs::GatewayMetrics;
use crate::store::ConfigStore;

/// Mail-transfer side effects for one message.
#[async_trait]
pub trait MailAction: Send + Sync {
    async fn forward(&self, addr: &str) -> Result<()>;
    async fn set_reject(&self, reason: &str) -> Result<()>;
}

/// Fetches the recipient's policy, evaluates it and, on `deliver`, carries
/// out the decision.
pub struct Dispatcher {
    store: Arc<dyn ConfigStore>,
    metrics: Arc<GatewayMetrics>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ConfigStore>, metrics: Arc<GatewayMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Decide the message's fate without side effects.
    ///
    /// A missing or unparseable policy is a normal reject outcome; only
    /// store failures surface as errors.
    pub async fn route(&self, msg: &MessageEnvelope) -> Result<Decision> {
        let started = Instant::now();
        let res = self.decide(msg).await;
        self.metrics.route_duration.observe(&[], started.elapsed());

        match &res {
            Ok(decision) => {
                let reason = decision.reject_reason().map(RejectReason::label).unwrap_or("");
                self.metrics
                    .route_decisions
                    .inc(&[("outcome", decision.outcome()), ("reason", reason)]);
            }
            Err(e) => {
                self.metrics.store_errors.inc(&[("op", "get")]);
                tracing::error!(to = %msg.to, error = %e, "policy lookup failed");
            }
        }
        res
    }

    async fn decide(&self, msg: &MessageEnvelope) -> Result<Decision> {
        tracing::debug!(to = %msg.to, "fetching routing policy");
        let Some(raw) = self.store.get(&msg.to).await? else {
            tracing::warn!(to = %msg.to, "no routing policy for recipient");
            return Ok(Decision::reject(RejectReason::NoRoute));
        };

        let doc = match PolicyDocument::from_json(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!(to = %msg.to, error = %e, "invalid routing policy");
                return Ok(Decision::reject(RejectReason::InvalidConfig));
            }
        };

        let eval = evaluate(&doc, msg);
        emit_events(msg, doc.logging, &eval.events);
        Ok(eval.decision)
    }

    /// Route, then forward to every address concurrently or reject.
    ///
    /// All forwards are attempted; the first failure is returned afterwards.
    pub async fn deliver(&self, msg: &MessageEnvelope, mail: &dyn MailAction) -> Result<Decision> {
        let decision = self.route(msg).await?;
        match &decision {
            Decision::Forward { forward_to } => {
                let results = join_all(forward_to.iter().map(|addr| mail.forward(addr))).await;
                for (addr, res) in forward_to.iter().zip(&results) {
                    match res {
                        Ok(()) => tracing::debug!(to = %msg.to, %addr, "forwarded"),
                        Err(e) => tracing::warn!(to = %msg.to, %addr, error = %e, "forward failed"),
                    }
                }
                results.into_iter().collect::<Result<Vec<()>>>()?;
            }
            Decision::Reject { reason } => {
                mail.set_reject(reason.as_str()).await?;
            }
        }
        Ok(decision)
    }
}
