use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use franquia_domain::pagination::{PageRequest, Sort};
use franquia_webhooks::domain::repository::{
    DeliveryLogRepository, SubscriptionRepository, WebhookSender,
};
use franquia_webhooks::domain::types::{
    DeliveryAttempt, OutgoingWebhook, SubscriptionPatch, WebhookResponse, WebhookSubscription,
};
use franquia_webhooks::error::WebhooksServiceError;

// ── MockSubscriptionRepo ─────────────────────────────────────────────────────

pub struct MockSubscriptionRepo {
    pub subscriptions: Vec<WebhookSubscription>,
    pub fail: bool,
    pub lookups: Arc<AtomicUsize>,
}

impl MockSubscriptionRepo {
    pub fn new(subscriptions: Vec<WebhookSubscription>) -> Self {
        Self {
            subscriptions,
            fail: false,
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(vec![])
        }
    }

    /// Shared counter of `find_deliverable` calls.
    pub fn lookups_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.lookups)
    }
}

impl SubscriptionRepository for MockSubscriptionRepo {
    async fn find_deliverable(
        &self,
        topic: &str,
    ) -> Result<Vec<WebhookSubscription>, WebhooksServiceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow::anyhow!("subscription store unavailable").into());
        }
        Ok(self
            .subscriptions
            .iter()
            .filter(|s| s.accepts(topic))
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<WebhookSubscription>, WebhooksServiceError> {
        Ok(self.subscriptions.iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<WebhookSubscription>, WebhooksServiceError> {
        Ok(self.subscriptions.clone())
    }

    async fn create(&self, _subscription: &WebhookSubscription) -> Result<(), WebhooksServiceError> {
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        _patch: &SubscriptionPatch,
    ) -> Result<bool, WebhooksServiceError> {
        Ok(self.subscriptions.iter().any(|s| s.id == id))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WebhooksServiceError> {
        Ok(self.subscriptions.iter().any(|s| s.id == id))
    }
}

// ── MockDeliveryLogRepo ──────────────────────────────────────────────────────

pub struct MockDeliveryLogRepo {
    pub attempts: Arc<Mutex<Vec<DeliveryAttempt>>>,
    pub fail: bool,
}

impl MockDeliveryLogRepo {
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Returns a shared handle to the recorded attempts for post-execution inspection.
    pub fn attempts_handle(&self) -> Arc<Mutex<Vec<DeliveryAttempt>>> {
        Arc::clone(&self.attempts)
    }
}

impl DeliveryLogRepository for MockDeliveryLogRepo {
    async fn record(&self, attempt: &DeliveryAttempt) -> Result<(), WebhooksServiceError> {
        if self.fail {
            return Err(anyhow::anyhow!("delivery log store unavailable").into());
        }
        self.attempts.lock().unwrap().push(attempt.clone());
        Ok(())
    }

    async fn list_by_subscription(
        &self,
        subscription_id: Uuid,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<DeliveryAttempt>, WebhooksServiceError> {
        let mut rows: Vec<_> = self
            .attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.subscription_id == subscription_id)
            .cloned()
            .collect();
        if sort == Sort::Desc {
            rows.reverse();
        }
        Ok(rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.clamped().per_page as usize)
            .collect())
    }
}

// ── MockWebhookSender ────────────────────────────────────────────────────────

#[derive(Clone)]
pub enum MockReply {
    Status(u16, &'static str),
    Unreachable,
}

pub struct MockWebhookSender {
    pub replies: HashMap<String, MockReply>,
    pub requests: Arc<Mutex<Vec<OutgoingWebhook>>>,
}

impl MockWebhookSender {
    /// Endpoints not listed answer `200 ok`.
    pub fn new(replies: Vec<(&str, MockReply)>) -> Self {
        Self {
            replies: replies
                .into_iter()
                .map(|(url, reply)| (url.to_owned(), reply))
                .collect(),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn requests_handle(&self) -> Arc<Mutex<Vec<OutgoingWebhook>>> {
        Arc::clone(&self.requests)
    }
}

impl WebhookSender for MockWebhookSender {
    async fn send(
        &self,
        request: &OutgoingWebhook,
    ) -> Result<WebhookResponse, WebhooksServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        match self
            .replies
            .get(&request.url)
            .cloned()
            .unwrap_or(MockReply::Status(200, "ok"))
        {
            MockReply::Status(status, body) => Ok(WebhookResponse {
                status,
                body: body.to_owned(),
            }),
            MockReply::Unreachable => {
                Err(anyhow::anyhow!("POST {}: connection refused", request.url).into())
            }
        }
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_subscription(endpoint_url: &str, topic: &str) -> WebhookSubscription {
    WebhookSubscription {
        id: Uuid::now_v7(),
        endpoint_url: endpoint_url.to_owned(),
        secret: None,
        topic: topic.to_owned(),
        enabled: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn signed_subscription(endpoint_url: &str, topic: &str, secret: &str) -> WebhookSubscription {
    WebhookSubscription {
        secret: Some(secret.to_owned()),
        ..test_subscription(endpoint_url, topic)
    }
}

pub fn disabled_subscription(endpoint_url: &str, topic: &str) -> WebhookSubscription {
    WebhookSubscription {
        enabled: false,
        ..test_subscription(endpoint_url, topic)
    }
}
