//! # gekko-api
//!
//! Typed client for the platform's one-shot request/response API: payments,
//! webhook deliveries, mock event triggers, and flow runs.
//!
//! The wire contract is JSON over HTTP with bearer authentication. Error
//! responses arrive as `{"error": {"code", "message"}}` envelopes and
//! surface as [`ApiError`] variants the CLI can match on.

#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use types::{
    CreatePayment, FlowRun, FlowStep, Payment, ReplayOutcome, TriggerEvent, WebhookEvent,
    WebhookQuery,
};
