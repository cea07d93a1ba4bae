use axum::{
    Router,
    http::{HeaderName, Method, header},
    routing::{get, patch, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use franquia_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    delivery::list_deliveries,
    dispatch::dispatch_webhook,
    health::{healthz, readyz},
    subscription::{
        create_subscription, delete_subscription, list_subscriptions, update_subscription,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Dispatch
        .route("/webhooks/dispatch", post(dispatch_webhook))
        // Subscriptions
        .route(
            "/webhooks/subscriptions",
            get(list_subscriptions).post(create_subscription),
        )
        .route(
            "/webhooks/subscriptions/{id}",
            patch(update_subscription).delete(delete_subscription),
        )
        .route("/webhooks/subscriptions/{id}/deliveries", get(list_deliveries))
        .layer(cors_layer())
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}

/// Answers `OPTIONS` preflights directly, with no body.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}
