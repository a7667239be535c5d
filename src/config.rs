use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Process-wide settings, loaded once at startup and injected into the
/// handler state. Nothing reads the environment during request handling.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Gates all outbound delivery. Only the literal `"true"` enables.
    pub notifications_enabled: bool,
    /// Destination Slack channel id.
    pub channel: String,
    /// Bot token for `chat.postMessage`. Absent token skips delivery with an
    /// error log instead of failing the webhook caller.
    pub bot_token: Option<String>,
    /// Slack API base, overridable so tests and mocks can intercept calls.
    pub api_base: String,
    pub addr: SocketAddr,
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self> {
        let notifications_enabled = flag_enabled(std::env::var("SLACK_NOTIFICATIONS_ENABLED").ok());
        let channel = std::env::var("SLACK_CHANNEL").unwrap_or_default();
        let bot_token = std::env::var("SLACK_BOT_TOKEN").ok();
        let api_base = std::env::var("SLACK_API_BASE")
            .unwrap_or_else(|_| "https://slack.com/api".to_string());
        let addr = std::env::var("BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".into())
            .parse()
            .context("invalid BIND address")?;
        Ok(Self {
            notifications_enabled,
            channel,
            bot_token,
            api_base,
            addr,
        })
    }
}

fn flag_enabled(value: Option<String>) -> bool {
    value.as_deref() == Some("true")
}
