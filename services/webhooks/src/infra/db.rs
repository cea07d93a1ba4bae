use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel as _, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use franquia_domain::pagination::{PageRequest, Sort};
use franquia_webhooks_schema::{webhook_delivery_logs, webhook_subscriptions};

use crate::domain::repository::{DeliveryLogRepository, SubscriptionRepository};
use crate::domain::types::{
    DeliveryAttempt, FIRST_ATTEMPT, GENERIC_TOPIC, SubscriptionPatch, WebhookSubscription,
};
use crate::error::WebhooksServiceError;

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn find_deliverable(
        &self,
        topic: &str,
    ) -> Result<Vec<WebhookSubscription>, WebhooksServiceError> {
        let models = webhook_subscriptions::Entity::find()
            .filter(webhook_subscriptions::Column::Enabled.eq(true))
            .filter(
                Condition::any()
                    .add(webhook_subscriptions::Column::Topic.eq(topic))
                    .add(webhook_subscriptions::Column::Topic.eq(GENERIC_TOPIC)),
            )
            .all(&self.db)
            .await
            .context("find deliverable webhook subscriptions")?;
        Ok(models.into_iter().map(subscription_from_model).collect())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<WebhookSubscription>, WebhooksServiceError> {
        let model = webhook_subscriptions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find webhook subscription by id")?;
        Ok(model.map(subscription_from_model))
    }

    async fn list(&self) -> Result<Vec<WebhookSubscription>, WebhooksServiceError> {
        let models = webhook_subscriptions::Entity::find()
            .order_by_desc(webhook_subscriptions::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list webhook subscriptions")?;
        Ok(models.into_iter().map(subscription_from_model).collect())
    }

    async fn create(&self, subscription: &WebhookSubscription) -> Result<(), WebhooksServiceError> {
        webhook_subscriptions::ActiveModel {
            id: Set(subscription.id),
            endpoint_url: Set(subscription.endpoint_url.clone()),
            secret: Set(subscription.secret.clone()),
            topic: Set(subscription.topic.clone()),
            enabled: Set(subscription.enabled),
            created_at: Set(subscription.created_at),
            updated_at: Set(subscription.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create webhook subscription")?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &SubscriptionPatch,
    ) -> Result<bool, WebhooksServiceError> {
        let Some(model) = webhook_subscriptions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find webhook subscription for update")?
        else {
            return Ok(false);
        };

        let mut am = model.into_active_model();
        if let Some(ref endpoint_url) = patch.endpoint_url {
            am.endpoint_url = Set(endpoint_url.clone());
        }
        if let Some(ref topic) = patch.topic {
            am.topic = Set(topic.clone());
        }
        if let Some(ref secret) = patch.secret {
            am.secret = Set(secret.clone());
        }
        if let Some(enabled) = patch.enabled {
            am.enabled = Set(enabled);
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db)
            .await
            .context("update webhook subscription")?;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WebhooksServiceError> {
        let result = webhook_subscriptions::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete webhook subscription")?;
        Ok(result.rows_affected > 0)
    }
}

fn subscription_from_model(model: webhook_subscriptions::Model) -> WebhookSubscription {
    WebhookSubscription {
        id: model.id,
        endpoint_url: model.endpoint_url,
        secret: model.secret,
        topic: model.topic,
        enabled: model.enabled,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Delivery log repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDeliveryLogRepository {
    pub db: DatabaseConnection,
}

impl DeliveryLogRepository for DbDeliveryLogRepository {
    async fn record(&self, attempt: &DeliveryAttempt) -> Result<(), WebhooksServiceError> {
        webhook_delivery_logs::ActiveModel {
            id: Set(attempt.id),
            subscription_id: Set(attempt.subscription_id),
            success: Set(attempt.success),
            status_code: Set(attempt.status_code.map(i32::from)),
            request_body: Set(attempt.request_body.clone()),
            response_body: Set(attempt.response_body.clone()),
            error_message: Set(attempt.error_message.clone()),
            attempt_number: Set(i32::try_from(attempt.attempt_number).unwrap_or(i32::MAX)),
            created_at: Set(attempt.created_at),
        }
        .insert(&self.db)
        .await
        .context("record webhook delivery")?;
        Ok(())
    }

    async fn list_by_subscription(
        &self,
        subscription_id: Uuid,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<DeliveryAttempt>, WebhooksServiceError> {
        let mut query = webhook_delivery_logs::Entity::find()
            .filter(webhook_delivery_logs::Column::SubscriptionId.eq(subscription_id));
        // ids are UUID v7, so they break created_at ties in insertion order.
        query = match sort {
            Sort::Desc => query
                .order_by_desc(webhook_delivery_logs::Column::CreatedAt)
                .order_by_desc(webhook_delivery_logs::Column::Id),
            Sort::Asc => query
                .order_by_asc(webhook_delivery_logs::Column::CreatedAt)
                .order_by_asc(webhook_delivery_logs::Column::Id),
        };
        let page = page.clamped();
        let models = query
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list webhook deliveries")?;
        Ok(models.into_iter().map(attempt_from_model).collect())
    }
}

fn attempt_from_model(model: webhook_delivery_logs::Model) -> DeliveryAttempt {
    DeliveryAttempt {
        id: model.id,
        subscription_id: model.subscription_id,
        success: model.success,
        status_code: model.status_code.and_then(|code| u16::try_from(code).ok()),
        request_body: model.request_body,
        response_body: model.response_body,
        error_message: model.error_message,
        attempt_number: u32::try_from(model.attempt_number).unwrap_or(FIRST_ATTEMPT),
        created_at: model.created_at,
    }
}
