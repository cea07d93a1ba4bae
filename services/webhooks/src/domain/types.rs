use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::error::WebhooksServiceError;

/// Topic that matches every dispatched event.
pub const GENERIC_TOPIC: &str = "generic";

/// Header carrying the payload signature for subscriptions with a secret.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Deliveries are attempted once per dispatch; there is no retry loop.
pub const FIRST_ATTEMPT: u32 = 1;

/// A registered destination for events.
#[derive(Debug, Clone)]
pub struct WebhookSubscription {
    pub id: Uuid,
    pub endpoint_url: String,
    pub secret: Option<String>,
    pub topic: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WebhookSubscription {
    /// Whether an event published under `topic` is delivered to this subscription.
    pub fn accepts(&self, topic: &str) -> bool {
        self.enabled && (self.topic == topic || self.topic == GENERIC_TOPIC)
    }
}

/// Partial update of a subscription. `secret: Some(None)` clears the secret.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionPatch {
    pub endpoint_url: Option<String>,
    pub topic: Option<String>,
    pub secret: Option<Option<String>>,
    pub enabled: Option<bool>,
}

impl SubscriptionPatch {
    pub fn is_empty(&self) -> bool {
        self.endpoint_url.is_none()
            && self.topic.is_none()
            && self.secret.is_none()
            && self.enabled.is_none()
    }
}

/// Validate a subscription endpoint: an absolute `http`/`https` URL with a host.
pub fn validate_endpoint_url(endpoint_url: &str) -> bool {
    match url::Url::parse(endpoint_url) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// The unit of work presented to the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatchEvent {
    pub topic: String,
    pub payload: Value,
}

/// Outbound POST for one subscription.
#[derive(Debug, Clone)]
pub struct OutgoingWebhook {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl OutgoingWebhook {
    pub fn new(url: &str, body: String, signature: Option<String>) -> Self {
        let mut headers = vec![("Content-Type", "application/json".to_owned())];
        if let Some(signature) = signature {
            headers.push((SIGNATURE_HEADER, signature));
        }
        Self {
            url: url.to_owned(),
            headers,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Completed HTTP exchange with a subscriber, whatever the status.
#[derive(Debug, Clone)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Persisted record of one delivery try to one subscription.
#[derive(Debug, Clone)]
pub struct DeliveryAttempt {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub success: bool,
    /// `None` when the request could not be completed.
    pub status_code: Option<u16>,
    pub request_body: Value,
    pub response_body: Option<String>,
    pub error_message: Option<String>,
    pub attempt_number: u32,
    pub created_at: DateTime<Utc>,
}

impl DeliveryAttempt {
    /// Build the log record for a settled delivery.
    pub fn settled(
        subscription_id: Uuid,
        request_body: Value,
        outcome: &Result<WebhookResponse, WebhooksServiceError>,
    ) -> Self {
        let (success, status_code, response_body, error_message) = match outcome {
            Ok(response) => (
                response.is_success(),
                Some(response.status),
                Some(response.body.clone()),
                None,
            ),
            Err(e) => (false, None, None, Some(e.to_string())),
        };
        Self {
            id: Uuid::now_v7(),
            subscription_id,
            success,
            status_code,
            request_body,
            response_body,
            error_message,
            attempt_number: FIRST_ATTEMPT,
            created_at: Utc::now(),
        }
    }
}

/// Per-subscription entry in the dispatch summary.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    pub subscription_id: Uuid,
    pub endpoint_url: String,
    pub success: bool,
    pub status_code: Option<u16>,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Aggregate of one dispatch call.
#[derive(Debug, Clone, Default)]
pub struct DispatchSummary {
    /// Subscriptions attempted.
    pub total: usize,
    /// Subscriptions that answered with a 2xx status.
    pub dispatched: usize,
    pub results: Vec<DeliveryResult>,
}

impl DispatchSummary {
    pub fn from_results(results: Vec<DeliveryResult>) -> Self {
        Self {
            total: results.len(),
            dispatched: results.iter().filter(|r| r.success).count(),
            results,
        }
    }
}
