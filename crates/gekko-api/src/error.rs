//! Platform API error types.

use thiserror::Error;

/// Errors from platform API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform rejected the credential.
    #[error("authentication failed (status {status}); check the configured api key")]
    Auth {
        /// HTTP status, 401 or 403.
        status: u16,
    },

    /// The configured credential cannot be sent as a header.
    #[error("api key is not a valid authorization header value")]
    InvalidKey,

    /// The platform returned a structured error.
    #[error("api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code, when the platform sent one.
        code: Option<String>,
        /// Human-readable message.
        message: String,
    },

    /// The response body did not match the documented shape.
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),
}
