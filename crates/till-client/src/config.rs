//! # Client Configuration
//!
//! Where the catalog/billing service lives and how long to wait for it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  built-in defaults ──► till.toml ──► TILL_* environment ──► validate()  │
//! │                                                                         │
//! │  till.toml lives in the platform config dir:                           │
//! │     ~/.config/till-pos/till.toml                               (Linux) │
//! │     ~/Library/Application Support/com.till.till-pos/till.toml  (macOS) │
//! │                                                                         │
//! │  Env keys: TILL_API_URL, TILL_API_PREFIX, TILL_TERMINAL_NAME,          │
//! │  TILL_REQUEST_TIMEOUT_SECS, TILL_CONNECT_TIMEOUT_SECS,                  │
//! │  TILL_RECENT_BILLS_LIMIT                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```toml
//! # till.toml
//! [server]
//! base_url = "http://localhost:5000"
//! api_prefix = "/api"
//! request_timeout_secs = 30
//! connect_timeout_secs = 10
//!
//! [terminal]
//! name = "Register 1"
//!
//! [analytics]
//! recent_bills_limit = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Server Settings
// =============================================================================

/// Location of the catalog/billing/analytics service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Scheme, host and port of the service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path every endpoint hangs off.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Whole-request timeout enforced by the HTTP transport (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_api_prefix() -> String {
    "/api".to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_connect_timeout() -> u64 {
    10
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

// =============================================================================
// Terminal & Analytics Settings
// =============================================================================

/// Identity of this register, used in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSettings {
    #[serde(default = "default_terminal_name")]
    pub name: String,
}

fn default_terminal_name() -> String {
    "Register 1".to_string()
}

impl Default for TerminalSettings {
    fn default() -> Self {
        TerminalSettings {
            name: default_terminal_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// How many bills the history panel shows.
    #[serde(default = "default_recent_bills_limit")]
    pub recent_bills_limit: usize,
}

fn default_recent_bills_limit() -> usize {
    20
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        AnalyticsSettings {
            recent_bills_limit: default_recent_bills_limit(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub terminal: TerminalSettings,

    #[serde(default)]
    pub analytics: AnalyticsSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `config_path` (or the platform default), layers `TILL_*`
    /// variables on top and validates. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Writes the config as TOML, creating parent directories. Returns the
    /// path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = self.to_toml()?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(path)
    }

    pub fn to_toml(&self) -> ClientResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects non-http(s) URLs and zero timeouts or limits.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.server.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "Service URL must start with http:// or https://, got: {}",
                self.server.base_url
            )));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.server.connect_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.analytics.recent_bills_limit == 0 {
            return Err(ClientError::InvalidConfig(
                "recent_bills_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Unparsable numbers are skipped with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("TILL_API_URL") {
            debug!(url = %url, "Overriding service URL from environment");
            self.server.base_url = url;
        }

        if let Some(prefix) = lookup("TILL_API_PREFIX") {
            self.server.api_prefix = prefix;
        }

        if let Some(raw) = lookup("TILL_REQUEST_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => self.server.request_timeout_secs = secs,
                Err(_) => warn!(value = %raw, "Ignoring invalid TILL_REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Some(raw) = lookup("TILL_CONNECT_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => self.server.connect_timeout_secs = secs,
                Err(_) => warn!(value = %raw, "Ignoring invalid TILL_CONNECT_TIMEOUT_SECS"),
            }
        }

        if let Some(name) = lookup("TILL_TERMINAL_NAME") {
            self.terminal.name = name;
        }

        if let Some(raw) = lookup("TILL_RECENT_BILLS_LIMIT") {
            match raw.parse() {
                Ok(limit) => self.analytics.recent_bills_limit = limit,
                Err(_) => warn!(value = %raw, "Ignoring invalid TILL_RECENT_BILLS_LIMIT"),
            }
        }
    }

    /// `till.toml` in the platform config directory, if there is one.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "till-pos")
            .map(|dirs| dirs.config_dir().join("till.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Base URL every endpoint is joined onto, always ending in `/`.
    ///
    /// ```rust
    /// use till_client::ClientConfig;
    ///
    /// let config = ClientConfig::default();
    /// let api = config.api_url().unwrap();
    /// assert_eq!(api.join("items").unwrap().as_str(), "http://localhost:5000/api/items");
    /// ```
    pub fn api_url(&self) -> ClientResult<Url> {
        let base = self.server.base_url.trim_end_matches('/');
        let prefix = self.server.api_prefix.trim_matches('/');
        let joined = if prefix.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{prefix}/")
        };
        Ok(Url::parse(&joined)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.server.connect_timeout_secs)
    }

    pub fn terminal_name(&self) -> &str {
        &self.terminal.name
    }

    pub fn recent_bills_limit(&self) -> usize {
        self.analytics.recent_bills_limit
    }

    /// Points the config at `base_url` with everything else default.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.server.base_url = base_url.into();
        config
    }
}
