//! Request and response types for the platform API.
//!
//! Response types derive `Serialize` as well so the CLI can re-emit them
//! pretty-printed for `inspect`-style commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for `POST /v1/payments`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    /// Amount in minor units (cents).
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Zone the payment's events are emitted into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

/// A payment intent as the platform reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Payment id, e.g. `pay_abc123`.
    pub id: String,
    /// Amount in minor units.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Processing status; opaque to the client.
    pub status: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// One webhook delivery record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Event id, e.g. `we_def456`.
    pub id: String,
    /// Dotted event type, e.g. `payment.succeeded`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Delivery status: `pending`, `delivered`, or `failed`.
    pub status: String,
    /// When the event was recorded.
    pub created_at: DateTime<Utc>,
    /// Zone the event belongs to, when scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Event payload.
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Response page for the webhook event listing.
#[derive(Debug, Deserialize)]
pub(crate) struct EventsPage {
    pub(crate) events: Vec<WebhookEvent>,
}

/// Query options for [`crate::ApiClient::list_webhook_events`].
#[derive(Debug, Clone)]
pub struct WebhookQuery {
    /// Maximum number of events returned, newest first.
    pub limit: u32,
    /// Restrict to one zone.
    pub zone: Option<String>,
    /// Restrict to a delivery status.
    pub status: Option<String>,
    /// Only events created at or after this RFC 3339 instant.
    pub since: Option<String>,
}

impl Default for WebhookQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            zone: None,
            status: None,
            since: None,
        }
    }
}

/// Result of asking the platform to re-deliver a webhook event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutcome {
    /// The replayed event id.
    pub id: String,
    /// Whether the re-delivery already succeeded, or was only queued.
    pub delivered: bool,
}

/// Request body for `POST /v1/events/trigger`.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerEvent {
    /// Dotted event type to emit.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Zone to emit into; the platform default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Event payload.
    pub data: Value,
}

/// One flow run with its step states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRun {
    /// Flow run id, e.g. `flow_abc123`.
    pub id: String,
    /// Flow name.
    pub name: String,
    /// Run status; opaque to the client.
    pub status: String,
    /// Ordered step states.
    #[serde(default)]
    pub steps: Vec<FlowStep>,
}

/// One step within a [`FlowRun`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStep {
    /// Step id, unique within the run.
    pub id: String,
    /// Step kind, e.g. `trigger` or `action`.
    #[serde(rename = "type")]
    pub step_type: String,
    /// Step status; opaque to the client.
    pub status: String,
}
