use sea_orm::Database;
use tracing::info;

use franquia_core::tracing::init_tracing;
use franquia_webhooks::config::WebhooksConfig;
use franquia_webhooks::infra::http::ReqwestWebhookSender;
use franquia_webhooks::router::build_router;
use franquia_webhooks::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = WebhooksConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let sender = ReqwestWebhookSender::new(config.webhook_timeout)
        .expect("failed to build webhook HTTP client");

    info!(
        signature_scheme = %config.signature_scheme,
        timeout = ?config.webhook_timeout,
        "webhook delivery configured"
    );

    let state = AppState {
        db,
        sender,
        signature_scheme: config.signature_scheme,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.webhooks_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("webhooks service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
