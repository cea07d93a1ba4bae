#![allow(async_fn_in_trait)]

use uuid::Uuid;

use franquia_domain::pagination::{PageRequest, Sort};

use crate::domain::types::{
    DeliveryAttempt, OutgoingWebhook, SubscriptionPatch, WebhookResponse, WebhookSubscription,
};
use crate::error::WebhooksServiceError;

/// Repository for webhook subscriptions.
pub trait SubscriptionRepository: Send + Sync {
    /// Enabled subscriptions whose topic is `topic` or the generic wildcard. Unordered.
    async fn find_deliverable(
        &self,
        topic: &str,
    ) -> Result<Vec<WebhookSubscription>, WebhooksServiceError>;

    async fn find_by_id(&self, id: Uuid)
    -> Result<Option<WebhookSubscription>, WebhooksServiceError>;

    /// All subscriptions, newest first.
    async fn list(&self) -> Result<Vec<WebhookSubscription>, WebhooksServiceError>;

    async fn create(&self, subscription: &WebhookSubscription) -> Result<(), WebhooksServiceError>;

    /// Apply a partial update. Returns `false` if no subscription has this id.
    async fn update(
        &self,
        id: Uuid,
        patch: &SubscriptionPatch,
    ) -> Result<bool, WebhooksServiceError>;

    /// Delete a subscription. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, WebhooksServiceError>;
}

/// Append-only store of delivery attempts.
pub trait DeliveryLogRepository: Send + Sync {
    async fn record(&self, attempt: &DeliveryAttempt) -> Result<(), WebhooksServiceError>;

    async fn list_by_subscription(
        &self,
        subscription_id: Uuid,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<DeliveryAttempt>, WebhooksServiceError>;
}

/// Port for sending one webhook POST.
///
/// Any completed HTTP exchange is `Ok`, whatever its status; `Err` means the
/// request could not be completed.
pub trait WebhookSender: Send + Sync {
    async fn send(&self, request: &OutgoingWebhook)
    -> Result<WebhookResponse, WebhooksServiceError>;
}
