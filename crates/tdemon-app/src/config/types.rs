//! Configuration types for Tunnel Demon
//!
//! Defines `Settings` (`config.toml`) and its sections.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use tdemon_core::Environment;
use tracing::warn;
use tdemon_daemon::{WgTools, DEFAULT_COMMAND_TIMEOUT, DEFAULT_INTERFACE_PREFIX};

/// Default directory for templates and merged configs
pub const DEFAULT_CONFIG_DIR: &str = "/etc/wireguard";

/// Production peer endpoint used for classification
pub const PRODUCTION_ENDPOINT: &str = "34.101.166.184:51820";

/// Non-production peer endpoint used for classification
pub const NON_PRODUCTION_ENDPOINT: &str = "34.128.85.147:51820";

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub tools: ToolSettings,

    #[serde(default)]
    pub endpoints: EndpointSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Filesystem layout
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PathSettings {
    /// Directory holding templates and merged configs
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Prefix for managed interface and file names
    #[serde(default = "default_interface_prefix")]
    pub interface_prefix: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            interface_prefix: default_interface_prefix(),
        }
    }
}

impl PathSettings {
    /// Managed interface prefix; empty or blank falls back to the default
    ///
    /// Every interface matches an empty prefix, so reconciliation would
    /// take down tunnels it does not own.
    pub fn prefix(&self) -> &str {
        if self.interface_prefix.trim().is_empty() {
            warn!(
                "Ignoring blank interface_prefix, using {:?}",
                DEFAULT_INTERFACE_PREFIX
            );
            DEFAULT_INTERFACE_PREFIX
        } else {
            &self.interface_prefix
        }
    }
}

fn default_config_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_DIR)
}

fn default_interface_prefix() -> String {
    DEFAULT_INTERFACE_PREFIX.to_string()
}

/// External tool settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ToolSettings {
    #[serde(default = "default_wg")]
    pub wg: String,

    #[serde(default = "default_wg_quick")]
    pub wg_quick: String,

    /// Per-invocation timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            wg: default_wg(),
            wg_quick: default_wg_quick(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ToolSettings {
    pub fn wg_tools(&self) -> WgTools {
        WgTools {
            wg: self.wg.clone(),
            wg_quick: self.wg_quick.clone(),
        }
    }

    /// Timeout as a `Duration`; zero falls back to the default
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            DEFAULT_COMMAND_TIMEOUT
        } else {
            Duration::from_secs(self.timeout_secs)
        }
    }
}

fn default_wg() -> String {
    "wg".to_string()
}

fn default_wg_quick() -> String {
    "wg-quick".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_COMMAND_TIMEOUT.as_secs()
}

/// Peer endpoints that identify each environment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointSettings {
    #[serde(default = "default_production_endpoint")]
    pub production: String,

    #[serde(default = "default_non_production_endpoint")]
    pub non_production: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            production: default_production_endpoint(),
            non_production: default_non_production_endpoint(),
        }
    }
}

impl EndpointSettings {
    pub fn for_environment(&self, env: Environment) -> &str {
        match env {
            Environment::Production => &self.production,
            Environment::NonProduction => &self.non_production,
        }
    }

    /// Exact-match classification of a peer endpoint
    pub fn classify(&self, endpoint: &str) -> Option<Environment> {
        Environment::ALL
            .into_iter()
            .find(|env| self.for_environment(*env) == endpoint)
    }
}

fn default_production_endpoint() -> String {
    PRODUCTION_ENDPOINT.to_string()
}

fn default_non_production_endpoint() -> String {
    NON_PRODUCTION_ENDPOINT.to_string()
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Maximum entries kept in the activity log
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            log_capacity: default_log_capacity(),
        }
    }
}

fn default_log_capacity() -> usize {
    200
}
