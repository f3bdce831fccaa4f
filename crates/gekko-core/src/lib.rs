//! # gekko-core
//!
//! Shared vocabulary for the gekko CLI: the decoded bus event, the pure
//! render pipeline that turns events into terminal lines, and the JSON
//! scaffold models written by `gekko generate`.
//!
//! Everything here is synchronous and side-effect free; I/O lives in the
//! crates that consume these types.

#![deny(unsafe_code)]

pub mod events;
pub mod render;
pub mod scaffold;

pub use events::BusEvent;
pub use render::{render_event, EventFilter, RenderMode};
pub use scaffold::{FlowScaffold, FlowScaffoldStep, ZoneScaffold};
