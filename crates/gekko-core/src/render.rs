//! Pure rendering of bus events into terminal lines.
//!
//! Rendering takes the event, the mode, the filter, and the timestamp as
//! inputs and returns a string (or nothing, when filtered out). No clocks,
//! no printing; callers own both.

use chrono::{DateTime, Local};

use crate::events::BusEvent;

/// Width of the event-type column in compact mode.
const TYPE_WIDTH: usize = 30;

/// Output detail for rendered events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// One line per event: timestamp, type, payload id.
    #[default]
    Compact,
    /// Timestamp and type, then the whole event pretty-printed.
    Verbose,
}

/// Optional substring predicate over event types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    needle: Option<String>,
}

impl EventFilter {
    /// Keep only events whose type contains `needle`.
    #[must_use]
    pub fn matching(needle: impl Into<String>) -> Self {
        Self {
            needle: Some(needle.into()),
        }
    }

    /// Whether `event_type` survives the filter. No needle matches everything.
    #[must_use]
    pub fn matches(&self, event_type: &str) -> bool {
        self.needle
            .as_deref()
            .is_none_or(|needle| event_type.contains(needle))
    }
}

impl From<Option<String>> for EventFilter {
    fn from(needle: Option<String>) -> Self {
        Self { needle }
    }
}

/// Render one event, or `None` when the filter drops it.
///
/// Compact mode pads the type to a fixed column so ids line up; events
/// without a string `id` leave the column empty. Verbose mode re-serializes
/// the whole event pretty-printed and adds a trailing blank line so
/// payloads read as blocks.
#[must_use]
pub fn render_event(
    event: &BusEvent,
    mode: RenderMode,
    filter: &EventFilter,
    at: DateTime<Local>,
) -> Option<String> {
    if !filter.matches(&event.event_type) {
        return None;
    }
    let ts = at.format("%H:%M:%S");
    let line = match mode {
        RenderMode::Compact => {
            let id = event.id().unwrap_or_default();
            format!(
                "[{ts}] {event_type:<width$}  {id}",
                event_type = event.event_type,
                width = TYPE_WIDTH
            )
        }
        RenderMode::Verbose => {
            let body = serde_json::to_string_pretty(event).unwrap_or_default();
            format!("[{ts}] {}\n{body}\n", event.event_type)
        }
    };
    Some(line)
}
