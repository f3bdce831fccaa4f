//! One end-to-end streaming session: open, spawn the reader, fire the
//! optional trigger, then supervise shutdown.

use std::time::Duration;

use gekko_core::render::{EventFilter, RenderMode};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ConnectConfig;
use crate::connection::open;
use crate::error::ConnectError;
use crate::reader::{read_events, EventSink};
use crate::shutdown::{supervise, ShutdownReason, DEFAULT_CLOSE_GRACE};

/// Knobs for [`run_session`] beyond the connection itself.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Output detail for rendered events.
    pub mode: RenderMode,
    /// Event-type filter; matches everything by default.
    pub filter: EventFilter,
    /// Payload sent once, as soon as the connection opens.
    pub trigger: Option<String>,
    /// How long to wait for the peer to acknowledge a close.
    pub close_grace: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Compact,
            filter: EventFilter::default(),
            trigger: None,
            close_grace: DEFAULT_CLOSE_GRACE,
        }
    }
}

/// Run one streaming session to completion.
///
/// Only the opening handshake can fail. Everything after that, including a
/// lost transport, is absorbed into the session and reported through logs
/// and the returned [`ShutdownReason`].
///
/// The trigger payload is sent without waiting on the reader's first
/// receive; a trigger failure is logged and the stream continues.
pub async fn run_session<S>(
    config: &ConnectConfig,
    options: SessionOptions,
    sink: S,
    cancel: CancellationToken,
) -> Result<ShutdownReason, ConnectError>
where
    S: EventSink + 'static,
{
    let (connection, frames) = open(config).await?;
    info!(url = %config.url, "event stream connected");

    let reader = tokio::spawn(read_events(
        frames,
        connection.clone(),
        options.mode,
        options.filter,
        sink,
    ));

    if let Some(payload) = &options.trigger {
        match connection.send(payload).await {
            Ok(()) => debug!(bytes = payload.len(), "trigger payload sent"),
            Err(error) => warn!(error = %error, "trigger send failed, streaming anyway"),
        }
    }

    Ok(supervise(&connection, reader, &cancel, options.close_grace).await)
}
