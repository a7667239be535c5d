//! Hostaway → Slack notification bridge.
//!
//! Accepts Hostaway webhook POSTs, keeps only `message.received` events,
//! formats each one into a Slack message, and posts it to `chat.postMessage`.
//! The service is stateless; every request is handled independently and
//! delivery failures never change the response to the webhook caller.

pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod slack;
pub mod telemetry;
pub mod webhook;

pub use config::BridgeConfig;
pub use error::BridgeError;
pub use http::{AppState, build_router};
pub use slack::{Delivery, Notifier, SkipReason, SlackClient};
