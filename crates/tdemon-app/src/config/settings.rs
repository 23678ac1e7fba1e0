//! Settings loader for `<config_dir>/tunnel-demon/config.toml`

use super::types::Settings;
use tdemon_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const TDEMON_DIR: &str = "tunnel-demon";

/// Overrides the settings file location when set and non-empty
pub const CONFIG_ENV: &str = "TDEMON_CONFIG";

/// Location of the user settings file, if a config directory exists
pub fn settings_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(TDEMON_DIR).join(CONFIG_FILENAME))
}

/// Load settings from the user config directory
///
/// A missing or unreadable file yields defaults.
pub fn load_settings() -> Settings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => {
            debug!("No user config directory, using default settings");
            Settings::default()
        }
    }
}

/// Load settings from an explicit file path
pub fn load_settings_from(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn test_settings_path_env_override() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "[ui]\nlog_capacity = 5\n").unwrap();

        std::env::set_var(CONFIG_ENV, &path);
        let resolved = settings_path();
        let settings = load_settings();
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(resolved, Some(path));
        assert_eq!(settings.ui.log_capacity, 5);
    }

    #[test]
    #[serial]
    fn test_settings_path_default_location() {
        std::env::remove_var(CONFIG_ENV);
        if let Some(path) = settings_path() {
            assert!(path.ends_with("tunnel-demon/config.toml"));
        }
    }

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings_from(&temp.path().join("config.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        let config = r#"
[paths]
config_dir = "/tmp/wg"
interface_prefix = "corp-"

[endpoints]
production = "10.0.0.1:51820"
"#;
        std::fs::write(&path, config).unwrap();

        let settings = load_settings_from(&path);

        assert_eq!(settings.paths.config_dir, PathBuf::from("/tmp/wg"));
        assert_eq!(settings.paths.interface_prefix, "corp-");
        assert_eq!(settings.endpoints.production, "10.0.0.1:51820");
        assert_eq!(settings.endpoints.non_production, "34.128.85.147:51820");
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[paths\nconfig_dir = ").unwrap();

        assert_eq!(load_settings_from(&path), Settings::default());
    }
}
