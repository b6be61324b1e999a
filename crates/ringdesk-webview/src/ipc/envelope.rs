//! Wire envelopes for the content <-> native channel.
//!
//! Upstream (content -> native):
//! `{ "event": "...", "payload": { "id": 1, "body": ... } }`
//!
//! Downstream (native -> content):
//! `{ "event": "...", "payload": { "type": "RECEIVED" | "RESPONSE", "id": 1, "body"?: ... }, "body": <same as payload> }`

use ringdesk_common::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::capability::{events, is_capability_event, Capability};

// =============================================================================
// UPSTREAM
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawMessage {
    event: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    id: u64,
    #[serde(default)]
    body: Value,
}

/// A request expecting RECEIVED then RESPONSE.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: u64,
    /// Event name as sent, echoed on the reply envelopes.
    pub event: String,
    pub capability: Capability,
}

/// Fire-and-forget messages. Never acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    BadgeCount(u32),
}

/// Everything that can arrive on the channel, decoded at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Request(Request),
    Notification(Notification),
    /// A known request whose body did not decode. It carries its id so
    /// the requester still gets RECEIVED and a RESPONSE.
    Invalid {
        id: u64,
        event: String,
        reason: String,
    },
    /// An event this shell does not implement.
    Unknown { event: String },
}

impl Inbound {
    /// Decode a raw IPC body posted by content.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        let msg: RawMessage =
            serde_json::from_str(raw).map_err(|e| BridgeError::Malformed(e.to_string()))?;

        if msg.event == events::BADGE_COUNT {
            return Ok(Self::Notification(Notification::BadgeCount(badge_count(
                &msg.payload,
            ))));
        }

        if !is_capability_event(&msg.event) {
            return Ok(Self::Unknown { event: msg.event });
        }

        let payload: RawPayload = serde_json::from_value(msg.payload)
            .map_err(|e| BridgeError::Malformed(format!("{}: {e}", msg.event)))?;

        match Capability::decode(&msg.event, payload.body) {
            Ok(Some(capability)) => Ok(Self::Request(Request {
                id: payload.id,
                event: msg.event,
                capability,
            })),
            Ok(None) => Ok(Self::Unknown { event: msg.event }),
            Err(e) => Ok(Self::Invalid {
                id: payload.id,
                event: msg.event,
                reason: e.to_string(),
            }),
        }
    }
}

/// Counts arrive as JS numbers; negatives and garbage clear the badge.
fn badge_count(payload: &Value) -> u32 {
    payload
        .as_f64()
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

// =============================================================================
// DOWNSTREAM
// =============================================================================

/// RESPONSE body for a request whose body could not be decoded.
pub fn invalid_body(reason: &str) -> Value {
    json!({ "error": { "kind": "invalid_body", "message": reason } })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseKind {
    Received,
    Response,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsePayload {
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub id: u64,
    /// Absent means "no data, success".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Reply sent to content. `body` duplicates `payload` for older listeners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub event: String,
    pub payload: ResponsePayload,
    pub body: ResponsePayload,
}

impl ResponseEnvelope {
    fn new(event: &str, payload: ResponsePayload) -> Self {
        Self {
            event: event.to_string(),
            body: payload.clone(),
            payload,
        }
    }

    pub fn received(event: &str, id: u64) -> Self {
        Self::new(
            event,
            ResponsePayload {
                kind: ResponseKind::Received,
                id,
                body: None,
            },
        )
    }

    pub fn response(event: &str, id: u64, body: Option<Value>) -> Self {
        Self::new(
            event,
            ResponsePayload {
                kind: ResponseKind::Response,
                id,
                body,
            },
        )
    }

    pub fn kind(&self) -> ResponseKind {
        self.payload.kind
    }

    pub fn id(&self) -> u64 {
        self.payload.id
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

// =============================================================================
// TESTS
// =============================================================================
