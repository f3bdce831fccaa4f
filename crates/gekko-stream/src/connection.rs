//! WebSocket session handle and lifecycle state.
//!
//! [`open`] performs the upgrade handshake and splits the socket: the write
//! half lives behind the cloneable [`Connection`] handle, the read half is
//! handed out once as a [`FrameStream`] and owned by the reader task.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::config::ConnectConfig;
use crate::error::{ConnectError, ReceiveError, SendError};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;

/// Lifecycle state of a [`Connection`].
///
/// Transitions are strictly forward: `Connecting → Open → Closing → Closed`.
/// `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ConnectionState {
    /// Handshake in progress.
    Connecting = 0,
    /// Frames flow in both directions.
    Open = 1,
    /// Close initiated; no new work is accepted.
    Closing = 2,
    /// Fully shut down.
    Closed = 3,
}

impl ConnectionState {
    /// Lowercase name for logs and error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Connecting,
            1 => Self::Open,
            2 => Self::Closing,
            _ => Self::Closed,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonic state cell. Backward transitions are silently refused, which
/// is what makes duplicate close requests harmless.
#[derive(Debug)]
struct StateCell(AtomicU8);

impl StateCell {
    fn new() -> Self {
        Self(AtomicU8::new(ConnectionState::Connecting as u8))
    }

    fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.0.load(Ordering::Relaxed))
    }

    /// Advance to `next` if it is strictly later than the current state.
    /// Returns whether the transition happened.
    fn advance(&self, next: ConnectionState) -> bool {
        self.0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                (next as u8 > current).then_some(next as u8)
            })
            .is_ok()
    }
}

#[derive(Debug)]
struct Shared {
    state: StateCell,
    writer: tokio::sync::Mutex<WsSink>,
}

/// Cloneable handle over one event-stream session's write half and state.
///
/// Exactly one `Connection` exists per session; clones share it. Writes are
/// serialized through an internal lock, so the reader task and the control
/// task can both hold a handle.
#[derive(Clone, Debug)]
pub struct Connection {
    shared: Arc<Shared>,
}

impl Connection {
    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.shared.state.get()
    }

    /// Write one text frame. Fails once the connection has left `Open`.
    pub async fn send(&self, payload: &str) -> Result<(), SendError> {
        let state = self.state();
        if state != ConnectionState::Open {
            return Err(SendError::NotOpen { state });
        }
        let mut writer = self.shared.writer.lock().await;
        writer.send(Message::Text(payload.into())).await?;
        Ok(())
    }

    /// Flip to `Closing` and send a protocol close frame.
    ///
    /// Does not wait for the peer's acknowledgment; the caller bounds that
    /// wait separately. Safe to call more than once.
    pub async fn initiate_close(&self) -> Result<(), SendError> {
        let _ = self.shared.state.advance(ConnectionState::Closing);
        let mut writer = self.shared.writer.lock().await;
        writer.send(Message::Close(None)).await?;
        Ok(())
    }

    /// Record that the stream is ending without sending anything, used when
    /// the peer already closed or the transport dropped.
    pub fn begin_close(&self) {
        let _ = self.shared.state.advance(ConnectionState::Closing);
    }

    /// Mark the session `Closed`. Terminal; later sends fail.
    pub fn finalize(&self) {
        let _ = self.shared.state.advance(ConnectionState::Closing);
        let _ = self.shared.state.advance(ConnectionState::Closed);
    }
}

/// One raw text frame off the wire.
#[derive(Debug, Clone)]
pub struct InboundFrame(tungstenite::Utf8Bytes);

impl InboundFrame {
    /// Frame contents as UTF-8 text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read half of a session; owned by exactly one reader task.
#[derive(Debug)]
pub struct FrameStream {
    stream: SplitStream<WsStream>,
}

impl FrameStream {
    /// Wait for the next text frame.
    ///
    /// Ping, pong, and binary frames are not part of the event stream and
    /// are skipped. A clean close handshake or stream end yields
    /// [`ReceiveError::Closed`]; any other transport failure yields
    /// [`ReceiveError::Abnormal`].
    pub async fn receive(&mut self) -> Result<InboundFrame, ReceiveError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(InboundFrame(text)),
                Some(Ok(Message::Close(frame))) => {
                    debug!(frame = ?frame, "peer sent close frame");
                    return Err(ReceiveError::Closed);
                }
                Some(Ok(_)) => {}
                Some(Err(error)) if is_clean_close(&error) => return Err(ReceiveError::Closed),
                Some(Err(error)) => return Err(ReceiveError::Abnormal(error)),
                None => return Err(ReceiveError::Closed),
            }
        }
    }
}

fn is_clean_close(error: &tungstenite::Error) -> bool {
    matches!(
        error,
        tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed
    )
}

/// Open the session described by `config`.
///
/// Performs the upgrade handshake and returns the shared write handle plus
/// the read half. Handshake failure is fatal to the caller; there is no
/// retry and no reconnection.
pub async fn open(config: &ConnectConfig) -> Result<(Connection, FrameStream), ConnectError> {
    let request = config.build_request()?;
    let (ws, response) = connect_async(request)
        .await
        .map_err(|source| ConnectError::Handshake {
            url: config.url.clone(),
            source,
        })?;
    debug!(status = response.status().as_u16(), url = %config.url, "upgrade handshake accepted");

    let (writer, stream) = ws.split();
    let shared = Arc::new(Shared {
        state: StateCell::new(),
        writer: tokio::sync::Mutex::new(writer),
    });
    let _ = shared.state.advance(ConnectionState::Open);
    Ok((Connection { shared }, FrameStream { stream }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_cell_starts_connecting() {
        let cell = StateCell::new();
        assert_eq!(cell.get(), ConnectionState::Connecting);
    }

    #[test]
    fn state_cell_advances_forward() {
        let cell = StateCell::new();
        assert!(cell.advance(ConnectionState::Open));
        assert!(cell.advance(ConnectionState::Closing));
        assert!(cell.advance(ConnectionState::Closed));
        assert_eq!(cell.get(), ConnectionState::Closed);
    }

    #[test]
    fn state_cell_refuses_backward_transitions() {
        let cell = StateCell::new();
        assert!(cell.advance(ConnectionState::Closing));
        assert!(!cell.advance(ConnectionState::Open));
        assert_eq!(cell.get(), ConnectionState::Closing);
    }

    #[test]
    fn closed_is_terminal() {
        let cell = StateCell::new();
        assert!(cell.advance(ConnectionState::Closed));
        assert!(!cell.advance(ConnectionState::Closing));
        assert!(!cell.advance(ConnectionState::Closed));
        assert_eq!(cell.get(), ConnectionState::Closed);
    }

    #[test]
    fn states_can_skip_intermediate_steps() {
        // The cell orders states; it does not require visiting each one.
        let cell = StateCell::new();
        assert!(cell.advance(ConnectionState::Open));
        assert!(cell.advance(ConnectionState::Closed));
        assert_eq!(cell.get(), ConnectionState::Closed);
    }

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionState::Open.to_string(), "open");
        assert_eq!(ConnectionState::Closing.to_string(), "closing");
        assert_eq!(ConnectionState::Closed.to_string(), "closed");
    }

    #[test]
    fn clean_close_errors_are_recognized() {
        assert!(is_clean_close(&tungstenite::Error::ConnectionClosed));
        assert!(is_clean_close(&tungstenite::Error::AlreadyClosed));
        let reset = tungstenite::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset",
        ));
        assert!(!is_clean_close(&reset));
    }
}
