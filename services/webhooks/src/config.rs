use std::time::Duration;

use crate::domain::signing::SignatureScheme;

/// Webhooks service configuration loaded from environment variables.
#[derive(Debug)]
pub struct WebhooksConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `WEBHOOKS_PORT`.
    pub webhooks_port: u16,
    /// Env var: `WEBHOOK_SIGNATURE_SCHEME` (`sha256-prefixed` | `hmac-sha256`).
    pub signature_scheme: SignatureScheme,
    /// Per-delivery timeout. Unset leaves the HTTP client default. Env var: `WEBHOOK_TIMEOUT_SECS`.
    pub webhook_timeout: Option<Duration>,
}

impl WebhooksConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            webhooks_port: std::env::var("WEBHOOKS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
            signature_scheme: std::env::var("WEBHOOK_SIGNATURE_SCHEME")
                .ok()
                .map(|v| v.parse().expect("WEBHOOK_SIGNATURE_SCHEME"))
                .unwrap_or_default(),
            webhook_timeout: std::env::var("WEBHOOK_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        }
    }
}
