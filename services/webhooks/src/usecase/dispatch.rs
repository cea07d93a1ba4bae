use std::time::Instant;

use anyhow::Context as _;
use futures::future::join_all;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::repository::{DeliveryLogRepository, SubscriptionRepository, WebhookSender};
use crate::domain::signing::SignatureScheme;
use crate::domain::types::{
    DeliveryAttempt, DeliveryResult, DispatchEvent, DispatchSummary, OutgoingWebhook,
    WebhookSubscription,
};
use crate::error::WebhooksServiceError;

/// Raw dispatch request. Either field may be absent or JSON `null`.
#[derive(Debug, Default)]
pub struct DispatchInput {
    pub topic: Option<String>,
    pub payload: Option<Value>,
}

impl DispatchInput {
    fn into_event(self) -> Result<DispatchEvent, WebhooksServiceError> {
        match (self.topic, self.payload) {
            (Some(topic), Some(payload)) if !topic.is_empty() && !payload.is_null() => {
                Ok(DispatchEvent { topic, payload })
            }
            _ => Err(WebhooksServiceError::MissingTopicOrPayload),
        }
    }
}

/// Fans one event out to every deliverable subscription and logs each attempt.
pub struct DispatchWebhookUseCase<S, L, T>
where
    S: SubscriptionRepository,
    L: DeliveryLogRepository,
    T: WebhookSender,
{
    pub subscriptions: S,
    pub logs: L,
    pub sender: T,
    pub signature_scheme: SignatureScheme,
}

impl<S, L, T> DispatchWebhookUseCase<S, L, T>
where
    S: SubscriptionRepository,
    L: DeliveryLogRepository,
    T: WebhookSender,
{
    /// An `Ok` summary means every resolved subscription was attempted, not that
    /// every one succeeded.
    pub async fn execute(
        &self,
        input: DispatchInput,
    ) -> Result<DispatchSummary, WebhooksServiceError> {
        let event = input.into_event()?;

        let subscriptions = self.subscriptions.find_deliverable(&event.topic).await?;
        if subscriptions.is_empty() {
            info!(topic = %event.topic, "no webhook subscriptions for topic");
            return Ok(DispatchSummary::default());
        }

        let body = serde_json::to_string(&event.payload).context("serialize webhook payload")?;

        // Every delivery settles on its own; none can short-circuit the others.
        let results = join_all(
            subscriptions
                .iter()
                .map(|subscription| self.deliver(subscription, &event, &body)),
        )
        .await;

        let summary = DispatchSummary::from_results(results);
        info!(
            topic = %event.topic,
            total = summary.total,
            dispatched = summary.dispatched,
            "webhook dispatch finished"
        );
        Ok(summary)
    }

    async fn deliver(
        &self,
        subscription: &WebhookSubscription,
        event: &DispatchEvent,
        body: &str,
    ) -> DeliveryResult {
        let started = Instant::now();
        let outcome = match self.build_request(subscription, body) {
            Ok(request) => self.sender.send(&request).await,
            Err(e) => Err(e),
        };
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let attempt = DeliveryAttempt::settled(subscription.id, event.payload.clone(), &outcome);
        if attempt.success {
            info!(
                subscription_id = %subscription.id,
                status_code = ?attempt.status_code,
                duration_ms,
                "webhook delivered"
            );
        } else {
            warn!(
                subscription_id = %subscription.id,
                status_code = ?attempt.status_code,
                error = ?attempt.error_message,
                duration_ms,
                "webhook delivery failed"
            );
        }

        // The delivery outcome is already decided; a failed log write must not change it.
        if let Err(e) = self.logs.record(&attempt).await {
            warn!(
                subscription_id = %subscription.id,
                error = %e,
                "failed to record webhook delivery"
            );
        }

        DeliveryResult {
            subscription_id: subscription.id,
            endpoint_url: subscription.endpoint_url.clone(),
            success: attempt.success,
            status_code: attempt.status_code,
            duration_ms,
            error: attempt.error_message,
        }
    }

    fn build_request(
        &self,
        subscription: &WebhookSubscription,
        body: &str,
    ) -> Result<OutgoingWebhook, WebhooksServiceError> {
        // An empty stored secret means unsigned, as on create and update.
        let signature = subscription
            .secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .map(|secret| self.signature_scheme.sign(secret, body))
            .transpose()?;
        Ok(OutgoingWebhook::new(
            &subscription.endpoint_url,
            body.to_owned(),
            signature,
        ))
    }
}
