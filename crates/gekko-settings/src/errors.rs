//! Error types for settings loading.

use thiserror::Error;

/// Errors that can occur while loading or parsing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file exists but contains invalid JSON.
    #[error("failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A setting resolved to a value outside its allowed range.
    #[error("invalid settings value: {0}")]
    InvalidValue(String),
}

/// Convenience alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
