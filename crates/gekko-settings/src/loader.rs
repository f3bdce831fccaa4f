//! Settings loading and layering.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::GekkoSettings;

/// Path to the user settings file, `~/.gekko/settings.json`.
#[must_use]
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".gekko").join("settings.json")
}

/// Load settings from the default path, layering file and environment
/// over compiled defaults.
pub fn load_settings() -> Result<GekkoSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from an explicit path.
///
/// A missing or empty file is not an error; defaults apply. A file that
/// exists but fails to parse is an error, so typos never silently fall
/// back to defaults.
pub fn load_settings_from_path(path: &Path) -> Result<GekkoSettings> {
    let mut merged = serde_json::to_value(GekkoSettings::default())?;

    if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            debug!(path = %path.display(), "settings file is empty, using defaults");
        } else {
            let overlay: Value = serde_json::from_str(&raw)?;
            deep_merge(&mut merged, overlay);
            debug!(path = %path.display(), "settings file merged");
        }
    } else {
        debug!(path = %path.display(), "settings file not found, using defaults");
    }

    let mut settings: GekkoSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Merge `overlay` into `base`: objects merge key by key, everything else
/// is replaced wholesale. Null overlay values are skipped so a file cannot
/// accidentally erase a default.
fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    continue;
                }
                match base_map.get_mut(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        let _ = base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            if !overlay_value.is_null() {
                *base_slot = overlay_value;
            }
        }
    }
}

/// Apply `GEKKO_*` environment overrides on top of the merged settings.
fn apply_env_overrides(settings: &mut GekkoSettings) {
    if let Some(url) = read_env_string("GEKKO_API_URL") {
        settings.api.base_url = url;
    }
    if let Some(key) = read_env_string("GEKKO_API_KEY") {
        settings.api.key = Some(key);
    }
    if let Some(zone) = read_env_string("GEKKO_ZONE") {
        settings.api.zone = Some(zone);
    }
    if let Some(url) = read_env_string("GEKKO_CONNECT_URL") {
        settings.stream.connect_url = url;
    }
    if let Some(ms) = read_env_u64("GEKKO_CLOSE_GRACE_MS", 100, 60_000) {
        settings.stream.close_grace_ms = ms;
    }
    if let Some(port) = read_env_u16("GEKKO_STUDIO_PORT", 1, 65_535) {
        settings.studio.port = port;
    }
    if let Some(dir) = read_env_string("GEKKO_STUDIO_DIR") {
        settings.studio.assets_dir = dir;
    }
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn read_env_u16(name: &str, min: u16, max: u16) -> Option<u16> {
    let raw = std::env::var(name).ok()?;
    match parse_u16_range(&raw, min, max) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(var = name, error = %error, "ignoring invalid environment override");
            None
        }
    }
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match parse_u64_range(&raw, min, max) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(var = name, error = %error, "ignoring invalid environment override");
            None
        }
    }
}

// ── Pure range parsers (testable without env vars) ──────────────────────────

fn parse_u16_range(raw: &str, min: u16, max: u16) -> Result<u16> {
    let value: u16 = raw.trim().parse().map_err(|_| {
        SettingsError::InvalidValue(format!("expected an integer in {min}..={max}, got '{raw}'"))
    })?;
    if !(min..=max).contains(&value) {
        return Err(SettingsError::InvalidValue(format!(
            "expected an integer in {min}..={max}, got {value}"
        )));
    }
    Ok(value)
}

fn parse_u64_range(raw: &str, min: u64, max: u64) -> Result<u64> {
    let value: u64 = raw.trim().parse().map_err(|_| {
        SettingsError::InvalidValue(format!("expected an integer in {min}..={max}, got '{raw}'"))
    })?;
    if !(min..=max).contains(&value) {
        return Err(SettingsError::InvalidValue(format!(
            "expected an integer in {min}..={max}, got {value}"
        )));
    }
    Ok(value)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write as _;

    fn write_settings(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings =
            load_settings_from_path(Path::new("/nonexistent/gekko/settings.json")).expect("load");
        assert_eq!(settings.api.base_url, "http://localhost:8089");
        assert_eq!(settings.studio.port, 3000);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_settings("   \n");
        let settings = load_settings_from_path(file.path()).expect("load");
        assert_eq!(settings.stream.close_grace_ms, 1_000);
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let file = write_settings(r#"{"api": {"key": "sk_test_9", "zone": "orders"}}"#);
        let settings = load_settings_from_path(file.path()).expect("load");
        assert_eq!(settings.api.key.as_deref(), Some("sk_test_9"));
        assert_eq!(settings.api.zone.as_deref(), Some("orders"));
        // Untouched sections keep their defaults.
        assert_eq!(settings.api.base_url, "http://localhost:8089");
        assert_eq!(settings.studio.assets_dir, "./studio");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let file = write_settings("{not json");
        let error = load_settings_from_path(file.path()).expect_err("should fail");
        assert!(matches!(error, SettingsError::Json(_)));
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let file = write_settings(r#"{"api": {"baseUrl": "http://prod:1"}, "future": {"x": 1}}"#);
        let settings = load_settings_from_path(file.path()).expect("load");
        assert_eq!(settings.api.base_url, "http://prod:1");
    }

    #[test]
    fn deep_merge_replaces_scalars_and_recurses_objects() {
        let mut base = json!({"a": {"b": 1, "c": 2}, "d": [1, 2]});
        deep_merge(&mut base, json!({"a": {"b": 9}, "d": [3]}));
        assert_eq!(base, json!({"a": {"b": 9, "c": 2}, "d": [3]}));
    }

    #[test]
    fn deep_merge_skips_nulls() {
        let mut base = json!({"a": 1, "b": {"c": 2}});
        deep_merge(&mut base, json!({"a": null, "b": {"c": null}}));
        assert_eq!(base, json!({"a": 1, "b": {"c": 2}}));
    }

    #[test]
    fn deep_merge_inserts_new_keys() {
        let mut base = json!({"a": 1});
        deep_merge(&mut base, json!({"b": {"c": 3}}));
        assert_eq!(base, json!({"a": 1, "b": {"c": 3}}));
    }

    #[test]
    fn parse_u16_range_accepts_in_range() {
        assert_eq!(parse_u16_range("3000", 1, 65_535).expect("valid"), 3000);
        assert_eq!(parse_u16_range(" 42 ", 1, 100).expect("valid"), 42);
    }

    #[test]
    fn parse_u16_range_rejects_out_of_range() {
        assert!(parse_u16_range("0", 1, 65_535).is_err());
        assert!(parse_u16_range("not a number", 1, 65_535).is_err());
    }

    #[test]
    fn parse_u64_range_bounds_are_inclusive() {
        assert_eq!(parse_u64_range("100", 100, 60_000).expect("valid"), 100);
        assert_eq!(parse_u64_range("60000", 100, 60_000).expect("valid"), 60_000);
        assert!(parse_u64_range("99", 100, 60_000).is_err());
        assert!(parse_u64_range("60001", 100, 60_000).is_err());
    }

    #[test]
    fn settings_path_lives_under_home() {
        let path = settings_path();
        assert!(path.ends_with(".gekko/settings.json"));
    }
}
