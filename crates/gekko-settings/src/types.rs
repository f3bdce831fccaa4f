//! Settings type definitions.
//!
//! All types serialize with camelCase field names to match the settings
//! file, and implement [`Default`] with production values. `#[serde(default)]`
//! lets a partial file omit any field.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root settings for the gekko CLI.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GekkoSettings {
    /// Settings schema version.
    pub version: String,
    /// Platform API access.
    pub api: ApiSettings,
    /// Event-stream client behavior.
    pub stream: StreamSettings,
    /// Local studio UI server.
    pub studio: StudioSettings,
}

impl Default for GekkoSettings {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            api: ApiSettings::default(),
            stream: StreamSettings::default(),
            studio: StudioSettings::default(),
        }
    }
}

/// Platform API access settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSettings {
    /// Base URL of the platform API.
    pub base_url: String,
    /// Bearer credential for API and stream calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Default zone scope for commands that take one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8089".to_string(),
            key: None,
            zone: None,
        }
    }
}

impl ApiSettings {
    /// The API base URL with its scheme swapped to WebSocket.
    ///
    /// `https://` becomes `wss://` and `http://` becomes `ws://`; anything
    /// else is returned unchanged.
    #[must_use]
    pub fn ws_base_url(&self) -> String {
        if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.base_url.clone()
        }
    }
}

/// Event-stream client settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamSettings {
    /// Default endpoint for raw `connect` sessions.
    pub connect_url: String,
    /// How long to wait for a close acknowledgment, in milliseconds.
    pub close_grace_ms: u64,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            connect_url: "ws://localhost:8080/ws".to_string(),
            close_grace_ms: 1_000,
        }
    }
}

impl StreamSettings {
    /// Close grace as a [`Duration`].
    #[must_use]
    pub fn close_grace(&self) -> Duration {
        Duration::from_millis(self.close_grace_ms)
    }
}

/// Studio UI server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioSettings {
    /// Port the studio binds on localhost.
    pub port: u16,
    /// Directory holding the studio's static assets.
    pub assets_dir: String,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            assets_dir: "./studio".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_platform() {
        let settings = GekkoSettings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8089");
        assert_eq!(settings.api.key, None);
        assert_eq!(settings.stream.connect_url, "ws://localhost:8080/ws");
        assert_eq!(settings.stream.close_grace_ms, 1_000);
        assert_eq!(settings.studio.port, 3000);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(GekkoSettings::default()).expect("serializable");
        assert!(json["api"]["baseUrl"].is_string());
        assert!(json["stream"]["closeGraceMs"].is_u64());
        assert!(json["studio"]["assetsDir"].is_string());
        // Unset options stay out of the file.
        assert!(json["api"].get("key").is_none());
    }

    #[test]
    fn partial_json_fills_from_defaults() {
        let settings: GekkoSettings =
            serde_json::from_str(r#"{"api":{"key":"sk_test_1"}}"#).expect("parseable");
        assert_eq!(settings.api.key.as_deref(), Some("sk_test_1"));
        assert_eq!(settings.api.base_url, "http://localhost:8089");
        assert_eq!(settings.studio.port, 3000);
    }

    #[test]
    fn ws_base_url_swaps_schemes() {
        let mut api = ApiSettings::default();
        assert_eq!(api.ws_base_url(), "ws://localhost:8089");

        api.base_url = "https://api.gekko.dev".to_string();
        assert_eq!(api.ws_base_url(), "wss://api.gekko.dev");

        api.base_url = "ws://already-ws:9".to_string();
        assert_eq!(api.ws_base_url(), "ws://already-ws:9");
    }

    #[test]
    fn close_grace_converts_to_duration() {
        let stream = StreamSettings {
            close_grace_ms: 250,
            ..StreamSettings::default()
        };
        assert_eq!(stream.close_grace(), Duration::from_millis(250));
    }
}
