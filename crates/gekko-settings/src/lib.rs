//! # gekko-settings
//!
//! Layered configuration for the gekko CLI.
//!
//! Settings are resolved from three sources, later wins:
//! 1. Compiled defaults, via [`GekkoSettings::default()`]
//! 2. The user file at `~/.gekko/settings.json`, deep-merged over defaults
//! 3. `GEKKO_*` environment variables
//!
//! [`load_settings`] returns a plain value that callers thread through
//! explicitly. There is no process-wide settings state; two loads in the
//! same process are independent.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings, load_settings_from_path, settings_path};
pub use types::{ApiSettings, GekkoSettings, StreamSettings, StudioSettings};
