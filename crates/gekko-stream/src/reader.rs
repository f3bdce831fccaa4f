//! The reader task: receive, decode, filter, render, emit.

use chrono::Local;
use gekko_core::events::BusEvent;
use gekko_core::render::{render_event, EventFilter, RenderMode};
use tokio::sync::mpsc;
use tracing::{debug, error, trace};

use crate::connection::{Connection, ConnectionState, FrameStream};
use crate::error::ReceiveError;

/// Why the reader loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderExit {
    /// The peer closed the stream cleanly.
    Closed,
    /// The transport dropped without a close handshake.
    Lost,
}

/// Destination for rendered event lines.
pub trait EventSink: Send {
    /// Hand one rendered line to the sink.
    fn emit(&mut self, line: String);
}

/// Prints each line to stdout. Event lines own stdout; logs go elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&mut self, line: String) {
        println!("{line}");
    }
}

/// Channel-backed sink; the receiving side decides what to do with lines.
/// A dropped receiver discards lines rather than ending the session.
impl EventSink for mpsc::UnboundedSender<String> {
    fn emit(&mut self, line: String) {
        let _ = self.send(line);
    }
}

/// Consume frames until the stream ends, one at a time and in wire order.
///
/// Frames that do not decode as events are dropped without ending the loop
/// or alarming the user. Frames that arrive after the session has left
/// `Open` are dropped unrendered. The returned [`ReaderExit`] is the loop's
/// single completion signal; it is reported exactly once, as the task's
/// return value.
pub async fn read_events<S: EventSink>(
    mut frames: FrameStream,
    connection: Connection,
    mode: RenderMode,
    filter: EventFilter,
    mut sink: S,
) -> ReaderExit {
    loop {
        match frames.receive().await {
            Ok(frame) => {
                let Some(event) = BusEvent::decode(frame.as_str()) else {
                    trace!(len = frame.as_str().len(), "dropped undecodable frame");
                    continue;
                };
                if connection.state() != ConnectionState::Open {
                    continue;
                }
                if let Some(line) = render_event(&event, mode, &filter, Local::now()) {
                    sink.emit(line);
                }
            }
            Err(ReceiveError::Closed) => {
                debug!("event stream ended");
                connection.begin_close();
                return ReaderExit::Closed;
            }
            Err(ReceiveError::Abnormal(cause)) => {
                error!(error = %cause, "event stream lost");
                connection.begin_close();
                return ReaderExit::Lost;
            }
        }
    }
}
