use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::types::{SubscriptionPatch, WebhookSubscription};
use crate::error::WebhooksServiceError;
use crate::state::AppState;
use crate::usecase::subscription::{
    CreateSubscriptionInput, CreateSubscriptionUseCase, DeleteSubscriptionUseCase,
    ListSubscriptionsUseCase, UpdateSubscriptionUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Subscription as exposed over HTTP. The secret itself is never returned.
#[derive(Serialize)]
pub struct SubscriptionResponse {
    pub id: Uuid,
    pub endpoint_url: String,
    pub topic: String,
    pub enabled: bool,
    pub has_secret: bool,
    #[serde(serialize_with = "franquia_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "franquia_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<WebhookSubscription> for SubscriptionResponse {
    fn from(subscription: WebhookSubscription) -> Self {
        Self {
            id: subscription.id,
            endpoint_url: subscription.endpoint_url,
            topic: subscription.topic,
            enabled: subscription.enabled,
            has_secret: subscription.secret.is_some(),
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
        }
    }
}

/// Unwrap the `{id}` segment, reporting a malformed one in the service's error shape.
pub(crate) fn subscription_id(
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Uuid, WebhooksServiceError> {
    id.map(|Path(id)| id)
        .map_err(|e| WebhooksServiceError::InvalidParameter(e.body_text()))
}

// ── GET /webhooks/subscriptions ──────────────────────────────────────────────

pub async fn list_subscriptions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubscriptionResponse>>, WebhooksServiceError> {
    let usecase = ListSubscriptionsUseCase {
        repo: state.subscription_repo(),
    };
    let subscriptions = usecase.execute().await?;
    Ok(Json(subscriptions.into_iter().map(Into::into).collect()))
}

// ── POST /webhooks/subscriptions ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSubscriptionRequest {
    pub endpoint_url: String,
    pub topic: String,
    pub secret: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Serialize)]
pub struct CreateSubscriptionResponse {
    pub id: Uuid,
}

pub async fn create_subscription(
    State(state): State<AppState>,
    body: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSubscriptionResponse>), WebhooksServiceError> {
    let Json(body) = body.map_err(|e| WebhooksServiceError::InvalidBody(e.body_text()))?;
    let usecase = CreateSubscriptionUseCase {
        repo: state.subscription_repo(),
    };
    let id = usecase
        .execute(CreateSubscriptionInput {
            endpoint_url: body.endpoint_url,
            topic: body.topic,
            secret: body.secret,
            enabled: body.enabled.unwrap_or(true),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(CreateSubscriptionResponse { id })))
}

// ── PATCH /webhooks/subscriptions/{id} ───────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub endpoint_url: Option<String>,
    pub topic: Option<String>,
    /// Absent keeps the secret, `null` clears it.
    #[serde(default, deserialize_with = "present_or_null")]
    pub secret: Option<Option<String>>,
    pub enabled: Option<bool>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

pub async fn update_subscription(
    id: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
    body: Result<Json<UpdateSubscriptionRequest>, JsonRejection>,
) -> Result<StatusCode, WebhooksServiceError> {
    let id = subscription_id(id)?;
    let Json(body) = body.map_err(|e| WebhooksServiceError::InvalidBody(e.body_text()))?;
    let usecase = UpdateSubscriptionUseCase {
        repo: state.subscription_repo(),
    };
    usecase
        .execute(
            id,
            SubscriptionPatch {
                endpoint_url: body.endpoint_url,
                topic: body.topic,
                secret: body.secret,
                enabled: body.enabled,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /webhooks/subscriptions/{id} ──────────────────────────────────────

pub async fn delete_subscription(
    id: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
) -> Result<StatusCode, WebhooksServiceError> {
    let id = subscription_id(id)?;
    let usecase = DeleteSubscriptionUseCase {
        repo: state.subscription_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
