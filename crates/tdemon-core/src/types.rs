//! Core domain types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    /// Event loop running
    #[default]
    Running,
    /// Application is shutting down
    Quitting,
}

/// One of the two fixed deployment contexts a tunnel can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Production,
    NonProduction,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::Production, Environment::NonProduction];

    /// Short tag used in interface and file names
    pub fn tag(&self) -> &'static str {
        match self {
            Environment::Production => "prod",
            Environment::NonProduction => "nonprod",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Environment::Production => "Production",
            Environment::NonProduction => "Non-Production",
        }
    }

    /// Well-known interface name for this environment, e.g. `julo-prod`
    pub fn interface_name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.tag())
    }

    /// Infer the environment from an interface name
    ///
    /// `nonprod` is checked first since it contains `prod`.
    pub fn from_interface_name(name: &str) -> Option<Self> {
        if name.contains("nonprod") {
            Some(Environment::NonProduction)
        } else if name.contains("prod") {
            Some(Environment::Production)
        } else {
            None
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Observed state of the managed tunnel, recomputed on every probe
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TunnelSession {
    pub connected: bool,
    pub environment: Option<Environment>,
    pub interface_name: String,
    pub endpoint: Option<String>,
    pub last_handshake: Option<DateTime<Local>>,
    pub bytes_received: u64,
    pub bytes_sent: u64,
}

impl TunnelSession {
    /// The only disconnected value: every other field absent/zero
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// A connected session for `interface_name` with no details parsed yet
    pub fn connected(interface_name: impl Into<String>) -> Self {
        let interface_name = interface_name.into();
        Self {
            connected: true,
            environment: Environment::from_interface_name(&interface_name),
            interface_name,
            ..Self::default()
        }
    }

    /// Time since the last handshake, if known
    pub fn handshake_age(&self, now: DateTime<Local>) -> Option<chrono::Duration> {
        self.last_handshake.map(|t| now.signed_duration_since(t))
    }
}

/// Format a byte count using binary units with one decimal place
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{} B", bytes);
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let suffix = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.1} {}iB", bytes as f64 / div as f64, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_tags() {
        assert_eq!(Environment::Production.tag(), "prod");
        assert_eq!(Environment::NonProduction.tag(), "nonprod");
        assert_eq!(
            Environment::NonProduction.interface_name("julo-"),
            "julo-nonprod"
        );
    }

    #[test]
    fn test_environment_from_interface_name() {
        assert_eq!(
            Environment::from_interface_name("julo-nonprod"),
            Some(Environment::NonProduction)
        );
        assert_eq!(
            Environment::from_interface_name("julo-prod"),
            Some(Environment::Production)
        );
        assert_eq!(Environment::from_interface_name("julo-staging"), None);
    }

    #[test]
    fn test_disconnected_has_no_details() {
        let session = TunnelSession::disconnected();
        assert!(!session.connected);
        assert!(session.environment.is_none());
        assert!(session.interface_name.is_empty());
        assert!(session.endpoint.is_none());
        assert!(session.last_handshake.is_none());
        assert_eq!(session.bytes_received, 0);
        assert_eq!(session.bytes_sent, 0);
    }

    #[test]
    fn test_connected_infers_environment() {
        let session = TunnelSession::connected("julo-prod");
        assert!(session.connected);
        assert_eq!(session.environment, Some(Environment::Production));
    }

    #[test]
    fn test_session_serializes_environment_snake_case() {
        let session = TunnelSession::connected("julo-nonprod");
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"non_production\""));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KiB");
        assert_eq!(format_bytes(1_572_864), "1.5 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GiB");
    }
}
