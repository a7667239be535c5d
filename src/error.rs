use thiserror::Error;

/// Failures surfaced by the webhook path.
///
/// Only `Parse` reaches the inbound caller (as a 500). Delivery and
/// transport errors are logged by the handler and swallowed.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid webhook payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("slack delivery failed: status={status} {detail}")]
    Delivery { status: u16, detail: String },

    #[error("slack transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
