//! Stream client error types.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::connection::ConnectionState;

/// Errors raised while opening an event-stream session.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The endpoint URL could not be turned into an upgrade request.
    #[error("invalid stream url '{url}': {reason}")]
    InvalidUrl {
        /// The URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The credential contains bytes that cannot travel in a header.
    #[error("credential is not a valid authorization header value")]
    InvalidCredential,

    /// The TCP connect or upgrade handshake failed.
    #[error("handshake with '{url}' failed: {source}")]
    Handshake {
        /// The endpoint that refused us.
        url: String,
        /// The transport-level cause.
        #[source]
        source: tungstenite::Error,
    },
}

/// Errors raised by [`crate::FrameStream::receive`].
#[derive(Debug, Error)]
pub enum ReceiveError {
    /// The peer completed a close handshake or the stream ended cleanly.
    #[error("connection closed by peer")]
    Closed,

    /// The transport failed without a close handshake.
    #[error("connection lost: {0}")]
    Abnormal(tungstenite::Error),
}

impl ReceiveError {
    /// Whether this is the expected end of a session rather than a fault.
    #[must_use]
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Errors raised when writing an outbound frame.
#[derive(Debug, Error)]
pub enum SendError {
    /// The connection is not open for writes.
    #[error("connection is {state}, not open")]
    NotOpen {
        /// State the connection was in at send time.
        state: ConnectionState,
    },

    /// The transport rejected the write.
    #[error("transport write failed: {0}")]
    Transport(#[from] tungstenite::Error),
}
