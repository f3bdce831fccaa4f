//! HTTP client for the platform API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::types::{
    CreatePayment, EventsPage, FlowRun, Payment, ReplayOutcome, TriggerEvent, WebhookEvent,
    WebhookQuery,
};

/// Default timeout for API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection details for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the platform API, e.g. `http://localhost:8089`.
    pub base_url: String,
    /// Bearer credential, when the deployment requires one.
    pub api_key: Option<String>,
}

/// Typed client for the platform's request/response API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: reqwest::Client,
}

/// Error envelope the platform wraps failures in.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: String,
}

impl ApiClient {
    /// Create a client for `config`.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, client })
    }

    /// Create a payment intent.
    #[instrument(skip_all, fields(amount = request.amount, currency = %request.currency))]
    pub async fn create_payment(&self, request: &CreatePayment) -> Result<Payment, ApiError> {
        self.post_json("/v1/payments", request).await
    }

    /// Recent webhook events, newest first.
    #[instrument(skip_all, fields(limit = query.limit))]
    pub async fn list_webhook_events(
        &self,
        query: &WebhookQuery,
    ) -> Result<Vec<WebhookEvent>, ApiError> {
        let mut pairs: Vec<(&str, String)> = vec![("limit", query.limit.to_string())];
        if let Some(zone) = &query.zone {
            pairs.push(("zone", zone.clone()));
        }
        if let Some(status) = &query.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(since) = &query.since {
            pairs.push(("since", since.clone()));
        }
        let page: EventsPage = self.get_json("/v1/webhooks/events", &pairs).await?;
        Ok(page.events)
    }

    /// One webhook event in full.
    pub async fn webhook_event(&self, event_id: &str) -> Result<WebhookEvent, ApiError> {
        self.get_json(&format!("/v1/webhooks/events/{event_id}"), &[])
            .await
    }

    /// Ask the platform to deliver `event_id` again.
    #[instrument(skip_all, fields(event_id = %event_id))]
    pub async fn replay_webhook_event(&self, event_id: &str) -> Result<ReplayOutcome, ApiError> {
        self.post_json(
            &format!("/v1/webhooks/events/{event_id}/replay"),
            &serde_json::json!({}),
        )
        .await
    }

    /// Inject a mock event into the bus. The platform accepts with `202`
    /// and no body; delivery is observed on the event stream.
    #[instrument(skip_all, fields(event_type = %request.event_type))]
    pub async fn trigger_event(&self, request: &TriggerEvent) -> Result<(), ApiError> {
        let url = self.url("/v1/events/trigger");
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .json(request)
            .send()
            .await?;
        let _ = Self::check(response).await?;
        Ok(())
    }

    /// One flow run with its step states.
    pub async fn flow_run(&self, flow_id: &str) -> Result<FlowRun, ApiError> {
        self.get_json(&format!("/v1/flows/{flow_id}"), &[]).await
    }

    // ─── Request plumbing ───

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn build_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &self.config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|_| ApiError::InvalidKey)?;
            let _ = headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .headers(self.build_headers()?)
            .query(query)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .json(body)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    /// Map non-success statuses onto the error taxonomy.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Auth {
                status: status.as_u16(),
            });
        }
        let body = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => (envelope.error.code, envelope.error.message),
            Err(_) if body.trim().is_empty() => (
                None,
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            ),
            Err(_) => (None, body),
        };
        Err(ApiError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(ApiError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(api_key: Option<&str>) -> ApiClient {
        ApiClient::new(ApiConfig {
            base_url: "http://localhost:8089".to_string(),
            api_key: api_key.map(str::to_string),
        })
        .expect("client")
    }

    #[test]
    fn url_joins_without_doubled_slash() {
        let client = ApiClient::new(ApiConfig {
            base_url: "http://localhost:8089/".to_string(),
            api_key: None,
        })
        .expect("client");
        assert_eq!(client.url("/v1/payments"), "http://localhost:8089/v1/payments");
    }

    #[test]
    fn headers_carry_bearer_credential() {
        let headers = test_client(Some("sk_test_9")).build_headers().expect("headers");
        assert_eq!(
            headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer sk_test_9")
        );
        assert_eq!(
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn headers_without_credential_skip_authorization() {
        let headers = test_client(None).build_headers().expect("headers");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn invalid_credential_is_rejected_up_front() {
        let result = test_client(Some("bad\nkey")).build_headers();
        assert!(matches!(result, Err(ApiError::InvalidKey)));
    }

    #[test]
    fn error_envelope_parses() {
        let envelope: ErrorEnvelope = serde_json::from_str(
            r#"{"error": {"code": "insufficient_funds", "message": "card declined"}}"#,
        )
        .expect("parseable");
        assert_eq!(envelope.error.code.as_deref(), Some("insufficient_funds"));
        assert_eq!(envelope.error.message, "card declined");
    }
}
