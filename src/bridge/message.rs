//! Inbound Message Module
//!
//! Transport envelope handed over by the broker client, and the decoding of
//! its object payload into an event object.

use serde_json::Value;

use crate::bridge::event::JsonEvent;
use crate::error::BridgeError;

// == Inbound Message ==
/// A message as delivered by the broker.
///
/// Only `Object` messages can carry a cache event. Their payload stays in its
/// serialized form until the bridge reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Plain text message
    Text(String),
    /// Opaque binary message
    Bytes(Vec<u8>),
    /// Serialized object payload (JSON)
    Object(Vec<u8>),
}

impl InboundMessage {
    /// Builds an object message from a JSON value.
    pub fn object(value: &Value) -> Self {
        Self::Object(value.to_string().into_bytes())
    }

    /// Builds a message from a raw body and its content type.
    ///
    /// `application/json` (and `+json` suffixes) become object messages,
    /// `text/*` becomes a text message, everything else stays raw bytes.
    pub fn from_content_type(content_type: Option<&str>, body: Vec<u8>) -> Self {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if essence == "application/json" || essence.ends_with("+json") {
            Self::Object(body)
        } else if essence.starts_with("text/") {
            Self::Text(String::from_utf8_lossy(&body).into_owned())
        } else {
            Self::Bytes(body)
        }
    }

    /// Content-type discriminant, used in diagnostics.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Object(_) => "object",
        }
    }

    // == Read Event ==
    /// Reads the cache event carried by this message.
    pub(crate) fn read_event(&self) -> Result<JsonEvent, BridgeError> {
        let raw = match self {
            Self::Object(raw) => raw,
            other => return Err(BridgeError::UnsupportedMessage(other.content_type())),
        };

        match serde_json::from_slice::<Value>(raw)? {
            Value::Object(fields) => Ok(JsonEvent::new(fields)),
            other => Err(BridgeError::NotCacheEvent(value_kind(&other))),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
