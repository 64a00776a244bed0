//! Configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use evalwatch_client::{DEFAULT_API_BASE, DEFAULT_LIVE_URL};

/// Shortest allowed periodic refresh interval
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 2;

/// Application settings (.evalwatch/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub endpoints: EndpointSettings,

    #[serde(default)]
    pub live: LiveSettings,

    #[serde(default)]
    pub refresh: RefreshSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Backend endpoints. Validated when the session starts, not when parsed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EndpointSettings {
    /// Base URL of the REST API (commands and results)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// WebSocket URL of the live status stream
    #[serde(default = "default_live_url")]
    pub live_url: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            live_url: default_live_url(),
        }
    }
}

/// Live channel behaviour
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LiveSettings {
    /// Append a disconnect line when the dashboard itself closes the channel
    #[serde(default)]
    pub log_caller_close: bool,
}

/// Results refresh behaviour
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RefreshSettings {
    /// Periodic results refresh in seconds, 0 disables it
    #[serde(default)]
    pub interval_secs: u64,

    /// Timeout for REST requests and the live channel handshake
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: 0,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl RefreshSettings {
    /// Periodic refresh interval, clamped to the minimum; `None` when disabled
    pub fn interval(&self) -> Option<Duration> {
        match self.interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs.max(MIN_REFRESH_INTERVAL_SECS))),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Show timestamps in the event log
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_timestamps: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_live_url() -> String {
    DEFAULT_LIVE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}
