//! # gekko-stream
//!
//! The real-time event-stream client: a persistent WebSocket session that
//! decodes and renders platform events while a control task supervises
//! graceful teardown.
//!
//! A session is exactly two tasks:
//! - the **reader task** ([`reader::read_events`]) owns the read half of the
//!   socket and turns frames into rendered lines, and
//! - the **control task** ([`session::run_session`]) opens the connection,
//!   fires the optional one-shot trigger, then waits on the shutdown race.
//!
//! Cancellation is cooperative. Ctrl-C only starts the close handshake;
//! [`shutdown::supervise`] bounds the wait for the peer's acknowledgment so
//! an unresponsive peer can never hang the process.

#![deny(unsafe_code)]

pub mod config;
pub mod connection;
pub mod error;
pub mod reader;
pub mod session;
pub mod shutdown;

pub use config::{ConnectConfig, CredentialPlacement};
pub use connection::{open, Connection, ConnectionState, FrameStream, InboundFrame};
pub use error::{ConnectError, ReceiveError, SendError};
pub use reader::{read_events, EventSink, ReaderExit, StdoutSink};
pub use session::{run_session, SessionOptions};
pub use shutdown::{supervise, ShutdownReason, DEFAULT_CLOSE_GRACE};
