//! Global configuration types for Threadcite.
//!
//! `GlobalConfig` represents the top-level `config.toml` that selects the
//! assistant and tunes the remote call and polling behavior.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.threadcite/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Remote assistant configuration to converse with.
    #[serde(default)]
    pub assistant_id: Option<String>,

    /// Base URL of the assistant API, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Delay between run status fetches.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum time to wait for a run to leave the pending states. 0 disables the ceiling.
    #[serde(default = "default_max_poll_secs")]
    pub max_poll_secs: u64,

    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_max_poll_secs() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            assistant_id: None,
            api_base_url: default_api_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_secs: default_max_poll_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GlobalConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// `None` when the ceiling is disabled.
    pub fn max_poll(&self) -> Option<Duration> {
        (self.max_poll_secs > 0).then(|| Duration::from_secs(self.max_poll_secs))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
