use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use franquia_domain::pagination::{PageRequest, Sort};

use crate::domain::types::DeliveryAttempt;
use crate::error::WebhooksServiceError;
use crate::handlers::subscription::subscription_id;
use crate::state::AppState;
use crate::usecase::delivery::ListDeliveriesUseCase;

#[derive(Serialize)]
pub struct DeliveryAttemptResponse {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub success: bool,
    pub status_code: Option<u16>,
    pub request_body: Value,
    pub response_body: Option<String>,
    pub error_message: Option<String>,
    pub attempt_number: u32,
    #[serde(serialize_with = "franquia_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<DeliveryAttempt> for DeliveryAttemptResponse {
    fn from(attempt: DeliveryAttempt) -> Self {
        Self {
            id: attempt.id,
            subscription_id: attempt.subscription_id,
            success: attempt.success,
            status_code: attempt.status_code,
            request_body: attempt.request_body,
            response_body: attempt.response_body,
            error_message: attempt.error_message,
            attempt_number: attempt.attempt_number,
            created_at: attempt.created_at,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DeliveryListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub sort: Option<Sort>,
}

// ── GET /webhooks/subscriptions/{id}/deliveries ──────────────────────────────

pub async fn list_deliveries(
    id: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
    query: Result<Query<DeliveryListQuery>, QueryRejection>,
) -> Result<Json<Vec<DeliveryAttemptResponse>>, WebhooksServiceError> {
    let id = subscription_id(id)?;
    let Query(query) =
        query.map_err(|e| WebhooksServiceError::InvalidParameter(e.body_text()))?;
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let usecase = ListDeliveriesUseCase {
        subscriptions: state.subscription_repo(),
        logs: state.delivery_log_repo(),
    };
    let attempts = usecase
        .execute(id, query.sort.unwrap_or_default(), page)
        .await?;
    Ok(Json(attempts.into_iter().map(Into::into).collect()))
}
