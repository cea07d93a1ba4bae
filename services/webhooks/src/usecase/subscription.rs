use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::SubscriptionRepository;
use crate::domain::types::{SubscriptionPatch, WebhookSubscription, validate_endpoint_url};
use crate::error::WebhooksServiceError;

fn check_topic(topic: &str) -> Result<(), WebhooksServiceError> {
    if topic.trim().is_empty() {
        return Err(WebhooksServiceError::InvalidTopic);
    }
    Ok(())
}

fn check_endpoint_url(endpoint_url: &str) -> Result<(), WebhooksServiceError> {
    if !validate_endpoint_url(endpoint_url) {
        return Err(WebhooksServiceError::InvalidEndpointUrl);
    }
    Ok(())
}

// ── CreateSubscription ───────────────────────────────────────────────────────

pub struct CreateSubscriptionInput {
    pub endpoint_url: String,
    pub topic: String,
    pub secret: Option<String>,
    pub enabled: bool,
}

pub struct CreateSubscriptionUseCase<R: SubscriptionRepository> {
    pub repo: R,
}

impl<R: SubscriptionRepository> CreateSubscriptionUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateSubscriptionInput,
    ) -> Result<Uuid, WebhooksServiceError> {
        check_endpoint_url(&input.endpoint_url)?;
        check_topic(&input.topic)?;
        let now = Utc::now();
        let subscription = WebhookSubscription {
            id: Uuid::now_v7(),
            endpoint_url: input.endpoint_url,
            secret: input.secret.filter(|s| !s.is_empty()),
            topic: input.topic,
            enabled: input.enabled,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&subscription).await?;
        Ok(subscription.id)
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<R: SubscriptionRepository> {
    pub repo: R,
}

impl<R: SubscriptionRepository> ListSubscriptionsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<WebhookSubscription>, WebhooksServiceError> {
        self.repo.list().await
    }
}

// ── UpdateSubscription ───────────────────────────────────────────────────────

pub struct UpdateSubscriptionUseCase<R: SubscriptionRepository> {
    pub repo: R,
}

impl<R: SubscriptionRepository> UpdateSubscriptionUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        mut patch: SubscriptionPatch,
    ) -> Result<(), WebhooksServiceError> {
        if patch.is_empty() {
            return Err(WebhooksServiceError::MissingData);
        }
        if matches!(patch.secret, Some(Some(ref secret)) if secret.is_empty()) {
            patch.secret = Some(None);
        }
        if let Some(ref endpoint_url) = patch.endpoint_url {
            check_endpoint_url(endpoint_url)?;
        }
        if let Some(ref topic) = patch.topic {
            check_topic(topic)?;
        }
        if self.repo.update(id, &patch).await? {
            Ok(())
        } else {
            Err(WebhooksServiceError::SubscriptionNotFound)
        }
    }
}

// ── DeleteSubscription ───────────────────────────────────────────────────────

pub struct DeleteSubscriptionUseCase<R: SubscriptionRepository> {
    pub repo: R,
}

impl<R: SubscriptionRepository> DeleteSubscriptionUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), WebhooksServiceError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(WebhooksServiceError::SubscriptionNotFound)
        }
    }
}
