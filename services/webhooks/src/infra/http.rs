use std::time::Duration;

use anyhow::Context as _;
use reqwest::Client;

use crate::domain::repository::WebhookSender;
use crate::domain::types::{OutgoingWebhook, WebhookResponse};
use crate::error::WebhooksServiceError;

/// Delivers webhooks over HTTP with a shared connection pool.
#[derive(Clone)]
pub struct ReqwestWebhookSender {
    client: Client,
}

impl ReqwestWebhookSender {
    /// `timeout: None` keeps the client default (no per-request timeout).
    pub fn new(timeout: Option<Duration>) -> Result<Self, WebhooksServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build webhook http client")?;
        Ok(Self { client })
    }
}

impl WebhookSender for ReqwestWebhookSender {
    async fn send(
        &self,
        request: &OutgoingWebhook,
    ) -> Result<WebhookResponse, WebhooksServiceError> {
        let mut builder = self.client.post(&request.url).body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("POST {}", request.url))?;
        let status = response.status().as_u16();
        // Raw text whatever the status; subscribers' bodies are not parsed.
        let body = response
            .text()
            .await
            .with_context(|| format!("read response body from {}", request.url))?;
        Ok(WebhookResponse { status, body })
    }
}
