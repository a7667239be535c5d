//! HTTP surface: status endpoint plus the webhook intake.
//!
//! Routing is by verb, matching how the upstream dashboard delivers
//! webhooks: any POST is webhook intake, GET serves the status document on
//! `/` and `/status` and 404s elsewhere, everything else is 405.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::format::format_notification;
use crate::slack::{Delivery, Notifier};
use crate::webhook::{self, MESSAGE_RECEIVED};

pub const SERVICE_NAME: &str = "A069 Webhook Handler";

#[derive(Clone)]
pub struct AppState {
    pub config: BridgeConfig,
    pub notifier: Arc<dyn Notifier>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handle_status)
                .post(handle_webhook)
                .fallback(method_not_allowed),
        )
        .route(
            "/status",
            get(handle_status)
                .post(handle_webhook)
                .fallback(method_not_allowed),
        )
        .fallback(dispatch_fallback)
        .with_state(state)
}

/// Routes requests that missed the named paths: webhooks may POST anywhere,
/// unknown GET paths are 404, the rest 405.
async fn dispatch_fallback(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    match method {
        Method::POST => process_webhook(&state, &body).await,
        Method::GET => (StatusCode::NOT_FOUND, "Not found").into_response(),
        _ => method_not_allowed().await.into_response(),
    }
}

async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

async fn handle_status(State(state): State<AppState>) -> Json<Value> {
    Json(status_document(&state.config))
}

fn status_document(config: &BridgeConfig) -> Value {
    json!({
        "service": SERVICE_NAME,
        "status": "running",
        "slack_notifications": if config.notifications_enabled { "enabled" } else { "disabled" },
        "channel": config.channel,
        "endpoints": {
            "status": "/status",
            "webhook": "/ (POST)",
        },
    })
}

async fn handle_webhook(State(state): State<AppState>, body: Bytes) -> Response {
    process_webhook(&state, &body).await
}

async fn process_webhook(state: &AppState, body: &[u8]) -> Response {
    let events = match webhook::normalize_payload(body) {
        Ok(events) => events,
        Err(error) => {
            warn!(%error, "failed to parse webhook payload");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };

    for event in &events {
        process_event(state.notifier.as_ref(), event).await;
    }

    (StatusCode::OK, "OK").into_response()
}

/// Handles one event of a batch. Never fails the batch: unrecognized kinds
/// are skipped, malformed events and delivery errors are logged and dropped.
async fn process_event(notifier: &dyn Notifier, event: &Value) {
    let kind = webhook::event_kind(event);
    if kind != Some(MESSAGE_RECEIVED) {
        info!(event = kind.unwrap_or("undefined"), "ignoring webhook event");
        return;
    }

    let data = match webhook::message_data(event) {
        Ok(data) => data,
        Err(error) => {
            warn!(%error, "malformed message.received event; skipping");
            return;
        }
    };

    let text = format_notification(&data);
    match notifier.notify(&text).await {
        Ok(Delivery::Sent) => {
            info!(
                conversation = %data.conversation_id_text(),
                "notification posted to slack"
            );
        }
        Ok(Delivery::Skipped(reason)) => debug!(?reason, "notification skipped"),
        Err(error) => warn!(%error, "slack delivery failed; continuing"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, channel: &str) -> BridgeConfig {
        BridgeConfig {
            notifications_enabled: enabled,
            channel: channel.into(),
            bot_token: None,
            api_base: "https://slack.com/api".into(),
            addr: std::net::SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }

    #[test]
    fn status_document_reports_enabled_channel() {
        let doc = status_document(&config(true, "C1"));
        assert_eq!(doc["service"], SERVICE_NAME);
        assert_eq!(doc["status"], "running");
        assert_eq!(doc["slack_notifications"], "enabled");
        assert_eq!(doc["channel"], "C1");
        assert_eq!(doc["endpoints"]["webhook"], "/ (POST)");
    }

    #[test]
    fn status_document_reports_disabled() {
        let doc = status_document(&config(false, "C2"));
        assert_eq!(doc["slack_notifications"], "disabled");
    }
}
