//! Webhook payload normalization and event filtering.
//!
//! Hostaway posts either a single event object or an array of them; both are
//! normalized to a batch of raw JSON values. Typed extraction is deferred to
//! the per-event loop so one malformed event cannot abort the batch.

use serde::Deserialize;
use serde_json::Value;

use crate::error::BridgeError;

/// The only event kind that is forwarded to Slack.
pub const MESSAGE_RECEIVED: &str = "message.received";

/// Fields of a `message.received` event that make it into the notification.
/// Everything is optional; Hostaway payloads vary and a missing field should
/// degrade the message, not drop it.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    #[serde(default)]
    pub body: Option<String>,
    /// Numeric in practice, but kept raw so string ids render unquoted too.
    #[serde(default)]
    pub conversation_id: Option<Value>,
    #[serde(default)]
    pub listing_time_zone_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Value>,
    #[serde(default)]
    pub images_urls: Option<Value>,
}

impl MessageData {
    /// True when the message carries attachments or image URLs. Mirrors the
    /// dashboard's notion of truthiness: any non-null, non-false, non-empty
    /// `imagesUrls` value counts, without validating it as a URL.
    pub fn has_attachments(&self) -> bool {
        if !self.attachments.is_empty() {
            return true;
        }
        match &self.images_urls {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(_) => true,
        }
    }

    pub fn conversation_id_text(&self) -> String {
        match &self.conversation_id {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

/// Normalizes the raw request body into a batch of event values.
///
/// A JSON array is taken as-is; a single object becomes a one-element batch.
/// Anything that is not valid JSON fails the whole request with a parse
/// error; there are no partial-success semantics at this stage.
pub fn normalize_payload(body: &[u8]) -> Result<Vec<Value>, BridgeError> {
    let payload: Value = serde_json::from_slice(body)?;
    Ok(match payload {
        Value::Array(events) => events,
        single => vec![single],
    })
}

/// Reads the nested `body.event` kind, tolerating missing intermediates.
pub fn event_kind(event: &Value) -> Option<&str> {
    event.pointer("/body/event").and_then(Value::as_str)
}

/// Extracts the message fields from a recognized event. A malformed `data`
/// block is an error for this event only; the caller skips it and moves on.
pub fn message_data(event: &Value) -> Result<MessageData, BridgeError> {
    let data = event.pointer("/body/data").cloned().unwrap_or(Value::Null);
    if data.is_null() {
        return Ok(MessageData::default());
    }
    Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_object_becomes_one_element_batch() {
        let body = br#"{"body":{"event":"message.received","data":{}}}"#;
        let events = normalize_payload(body).expect("valid json");
        assert_eq!(events.len(), 1);
        assert_eq!(event_kind(&events[0]), Some(MESSAGE_RECEIVED));
    }

    #[test]
    fn array_is_kept_in_order() {
        let body = br#"[{"body":{"event":"a"}},{"body":{"event":"b"}}]"#;
        let events = normalize_payload(body).expect("valid json");
        assert_eq!(events.len(), 2);
        assert_eq!(event_kind(&events[0]), Some("a"));
        assert_eq!(event_kind(&events[1]), Some("b"));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = normalize_payload(b"not json").unwrap_err();
        assert!(matches!(err, BridgeError::Parse(_)));
    }

    #[test]
    fn missing_intermediates_yield_no_kind() {
        assert_eq!(event_kind(&json!({})), None);
        assert_eq!(event_kind(&json!({"body": {}})), None);
        assert_eq!(event_kind(&json!({"body": {"event": 7}})), None);
    }

    #[test]
    fn message_data_tolerates_missing_fields() {
        let event = json!({"body": {"event": "message.received"}});
        let data = message_data(&event).expect("default data");
        assert_eq!(data, MessageData::default());
        assert!(!data.has_attachments());
    }

    #[test]
    fn message_data_rejects_malformed_data_block() {
        let event = json!({"body": {"event": "message.received", "data": {"attachments": 3}}});
        assert!(matches!(
            message_data(&event),
            Err(BridgeError::Parse(_))
        ));
    }

    #[test]
    fn attachment_presence_from_list_or_image_urls() {
        let with_list: MessageData = serde_json::from_value(json!({
            "attachments": [{"url": "https://x/y.pdf"}]
        }))
        .unwrap();
        assert!(with_list.has_attachments());

        let with_urls: MessageData = serde_json::from_value(json!({
            "imagesUrls": ["https://x/y.png"]
        }))
        .unwrap();
        assert!(with_urls.has_attachments());

        let empty_urls: MessageData = serde_json::from_value(json!({
            "imagesUrls": []
        }))
        .unwrap();
        assert!(!empty_urls.has_attachments());

        assert!(!MessageData::default().has_attachments());
    }

    #[test]
    fn conversation_id_renders_unquoted() {
        let numeric: MessageData =
            serde_json::from_value(json!({"conversationId": 31989132})).unwrap();
        assert_eq!(numeric.conversation_id_text(), "31989132");

        let text: MessageData =
            serde_json::from_value(json!({"conversationId": "abc-123"})).unwrap();
        assert_eq!(text.conversation_id_text(), "abc-123");
    }
}
