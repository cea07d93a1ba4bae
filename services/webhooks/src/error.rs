use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Webhooks service error variants.
#[derive(Debug, thiserror::Error)]
pub enum WebhooksServiceError {
    #[error("topic e payload são obrigatórios")]
    MissingTopicOrPayload,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("invalid request parameter: {0}")]
    InvalidParameter(String),
    #[error("invalid endpoint url")]
    InvalidEndpointUrl,
    #[error("invalid topic")]
    InvalidTopic,
    #[error("missing data")]
    MissingData,
    #[error("subscription not found")]
    SubscriptionNotFound,
    /// Storage, transport and signing failures. Rendered with the full context chain.
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl WebhooksServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingTopicOrPayload => "MISSING_TOPIC_OR_PAYLOAD",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::InvalidEndpointUrl => "INVALID_ENDPOINT_URL",
            Self::InvalidTopic => "INVALID_TOPIC",
            Self::MissingData => "MISSING_DATA",
            Self::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for WebhooksServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingTopicOrPayload
            | Self::InvalidBody(_)
            | Self::InvalidParameter(_)
            | Self::InvalidEndpointUrl
            | Self::InvalidTopic
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::SubscriptionNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors; TraceLayer already records them.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "error": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
