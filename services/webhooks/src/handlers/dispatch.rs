use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::types::{DeliveryResult, DispatchSummary};
use crate::error::WebhooksServiceError;
use crate::state::AppState;
use crate::usecase::dispatch::{DispatchInput, DispatchWebhookUseCase};

// ── POST /webhooks/dispatch ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DispatchRequest {
    pub topic: Option<String>,
    pub payload: Option<Value>,
}

#[derive(Serialize)]
pub struct DeliveryResultResponse {
    pub subscription_id: Uuid,
    pub endpoint_url: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<DeliveryResult> for DeliveryResultResponse {
    fn from(result: DeliveryResult) -> Self {
        Self {
            subscription_id: result.subscription_id,
            endpoint_url: result.endpoint_url,
            success: result.success,
            status_code: result.status_code,
            duration_ms: result.duration_ms,
            error: result.error,
        }
    }
}

#[derive(Serialize)]
pub struct DispatchResponse {
    pub success: bool,
    pub message: String,
    pub dispatched: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<DeliveryResultResponse>>,
}

impl From<DispatchSummary> for DispatchResponse {
    fn from(summary: DispatchSummary) -> Self {
        if summary.total == 0 {
            return Self {
                success: true,
                message: "Nenhuma assinatura ativa para este tópico".to_owned(),
                dispatched: 0,
                total: None,
                results: None,
            };
        }
        Self {
            success: true,
            message: format!(
                "Webhooks disparados: {}/{} entregues",
                summary.dispatched, summary.total
            ),
            dispatched: summary.dispatched,
            total: Some(summary.total),
            results: Some(summary.results.into_iter().map(Into::into).collect()),
        }
    }
}

pub async fn dispatch_webhook(
    State(state): State<AppState>,
    body: Result<Json<DispatchRequest>, JsonRejection>,
) -> Result<Json<DispatchResponse>, WebhooksServiceError> {
    let Json(body) = body.map_err(|e| WebhooksServiceError::InvalidBody(e.body_text()))?;
    let usecase = DispatchWebhookUseCase {
        subscriptions: state.subscription_repo(),
        logs: state.delivery_log_repo(),
        sender: state.webhook_sender(),
        signature_scheme: state.signature_scheme,
    };
    let summary = usecase
        .execute(DispatchInput {
            topic: body.topic,
            payload: body.payload,
        })
        .await?;
    Ok(Json(summary.into()))
}
