//! Session teardown: the shutdown race and the bounded close handshake.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::connection::Connection;
use crate::reader::ReaderExit;

/// How long to wait for the peer to acknowledge a close, by default.
pub const DEFAULT_CLOSE_GRACE: Duration = Duration::from_secs(1);

/// Why the session began teardown. Exactly one reason per session; the
/// first trigger wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The operator cancelled the session.
    UserCancel,
    /// The peer completed a normal close handshake.
    ReaderEof,
    /// The transport dropped without a close handshake.
    RemoteClose,
}

impl ShutdownReason {
    /// Lowercase name for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserCancel => "user cancel",
            Self::ReaderEof => "reader eof",
            Self::RemoteClose => "remote close",
        }
    }
}

impl std::fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn reason_for_exit(exit: Result<ReaderExit, tokio::task::JoinError>) -> ShutdownReason {
    match exit {
        Ok(ReaderExit::Closed) => ShutdownReason::ReaderEof,
        Ok(ReaderExit::Lost) => ShutdownReason::RemoteClose,
        Err(error) => {
            error!(error = %error, "reader task failed");
            ShutdownReason::RemoteClose
        }
    }
}

/// Wait out the session, then drive teardown to `Closed`.
///
/// Races the cancellation token against the reader's completion. On
/// cancellation the close handshake starts and the reader gets `grace` to
/// observe the peer's acknowledgment; when the deadline passes the reader
/// is abandoned and teardown completes anyway. When the reader finishes
/// first, the peer already ended the stream and no handshake is owed.
///
/// A second cancellation while closing changes nothing.
pub async fn supervise(
    connection: &Connection,
    mut reader: JoinHandle<ReaderExit>,
    cancel: &CancellationToken,
    grace: Duration,
) -> ShutdownReason {
    let reason = tokio::select! {
        () = cancel.cancelled() => {
            debug!("cancellation requested, closing session");
            if let Err(error) = connection.initiate_close().await {
                warn!(error = %error, "close frame not sent");
            }
            match tokio::time::timeout(grace, &mut reader).await {
                Ok(exit) => debug!(exit = ?exit.ok(), "reader finished during close handshake"),
                Err(_) => {
                    warn!(grace = ?grace, "peer never acknowledged close, abandoning reader");
                    reader.abort();
                }
            }
            ShutdownReason::UserCancel
        }
        exit = &mut reader => reason_for_exit(exit),
    };
    connection.finalize();
    debug!(reason = %reason, "session done");
    reason
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clean_reader_exit_is_eof() {
        let exit = tokio::spawn(async { ReaderExit::Closed }).await;
        assert_eq!(reason_for_exit(exit), ShutdownReason::ReaderEof);
    }

    #[tokio::test]
    async fn lost_reader_exit_is_remote_close() {
        let exit = tokio::spawn(async { ReaderExit::Lost }).await;
        assert_eq!(reason_for_exit(exit), ShutdownReason::RemoteClose);
    }

    #[tokio::test]
    async fn panicked_reader_counts_as_remote_close() {
        let exit = tokio::spawn(async { panic!("boom") }).await;
        assert_eq!(reason_for_exit(exit), ShutdownReason::RemoteClose);
    }

    #[test]
    fn default_close_grace_is_one_second() {
        assert_eq!(DEFAULT_CLOSE_GRACE, Duration::from_secs(1));
    }

    #[test]
    fn reasons_have_log_names() {
        assert_eq!(ShutdownReason::UserCancel.to_string(), "user cancel");
        assert_eq!(ShutdownReason::ReaderEof.to_string(), "reader eof");
        assert_eq!(ShutdownReason::RemoteClose.to_string(), "remote close");
    }
}
