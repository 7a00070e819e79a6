//! Startup configuration for the native probe
//!
//! Resolved once from the environment:
//! - `WS_PROBE_URL`: WebSocket endpoint
//! - `WS_PROBE_API`: base URL of the HTTP control surface
//! - `WS_PROBE_AUTOCONNECT`: connect on startup (`1`/`true`/`yes`)

use crate::core::{ProbeError, ProbeResult};

/// Default WebSocket endpoint of the test server
pub const DEFAULT_WS_URL: &str = "ws://127.0.0.1:8765/chat";
/// Default base URL for control requests
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8765";

pub const ENV_WS_URL: &str = "WS_PROBE_URL";
pub const ENV_API_BASE: &str = "WS_PROBE_API";
pub const ENV_AUTOCONNECT: &str = "WS_PROBE_AUTOCONNECT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeConfig {
    pub ws_url: String,
    /// Without trailing slash, so command paths can be appended directly
    pub api_base: String,
    pub autoconnect: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ws_url: DEFAULT_WS_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            autoconnect: false,
        }
    }
}

impl ProbeConfig {
    pub fn from_env() -> ProbeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ProbeResult<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let ws_url = get(ENV_WS_URL).unwrap_or_else(|| DEFAULT_WS_URL.to_string());

        let api_base = get(ENV_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ProbeError::Config(format!(
                "{ENV_API_BASE} must be an http(s) URL, got {api_base:?}"
            )));
        }
        let api_base = api_base.trim_end_matches('/').to_string();

        let autoconnect = match get(ENV_AUTOCONNECT) {
            None => false,
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ProbeError::Config(format!(
                        "{ENV_AUTOCONNECT} must be a boolean, got {v:?}"
                    )))
                }
            },
        };

        Ok(Self {
            ws_url,
            api_base,
            autoconnect,
        })
    }
}
