//! Slack delivery client.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::BridgeConfig;
use crate::error::BridgeError;

/// Sender label shown on the posted message.
pub const BOT_USERNAME: &str = "A069 Message";

/// Outcome of a delivery attempt that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `SLACK_NOTIFICATIONS_ENABLED` is not `"true"`.
    Disabled,
    /// No bot token configured; logged as an error but not a failure.
    MissingToken,
}

/// Seam between the webhook handler and Slack, so tests can record and fail
/// deliveries without a network.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<Delivery, BridgeError>;
}

/// Posts notifications through `chat.postMessage`. One-shot per call: no
/// retries, no backoff, no idempotency key.
pub struct SlackClient {
    http: reqwest::Client,
    enabled: bool,
    channel: String,
    token: Option<String>,
    api_base: String,
}

impl SlackClient {
    pub fn new(http: reqwest::Client, config: &BridgeConfig) -> Self {
        Self {
            http,
            enabled: config.notifications_enabled,
            channel: config.channel.clone(),
            token: config.bot_token.clone(),
            api_base: config.api_base.clone(),
        }
    }

    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Notifier for SlackClient {
    async fn notify(&self, text: &str) -> Result<Delivery, BridgeError> {
        if !self.enabled {
            tracing::info!("slack notifications disabled; skipping message");
            return Ok(Delivery::Skipped(SkipReason::Disabled));
        }
        let Some(token) = self.token.as_deref() else {
            tracing::error!("SLACK_BOT_TOKEN not configured; dropping notification");
            return Ok(Delivery::Skipped(SkipReason::MissingToken));
        };

        let payload = json!({
            "channel": self.channel,
            "username": BOT_USERNAME,
            "text": text,
            "unfurl_links": false,
            "unfurl_media": false,
        });

        let response = self
            .http
            .post(self.build_url("chat.postMessage"))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BridgeError::Delivery {
                status: status.as_u16(),
                detail: body,
            });
        }

        let raw: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        let ok = raw.get("ok").and_then(Value::as_bool).unwrap_or(false);
        if !ok {
            let error = raw
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            return Err(BridgeError::Delivery {
                status: status.as_u16(),
                detail: error.to_string(),
            });
        }

        Ok(Delivery::Sent)
    }
}
