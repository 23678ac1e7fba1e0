//! Config path validation for the path prompt

use std::path::PathBuf;

/// Turn prompt input into a config path, or an inline error message
///
/// A leading `~/` expands to the home directory.
pub fn validate_config_path(input: &str) -> Result<PathBuf, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Enter the path to a WireGuard .conf file".to_string());
    }
    if !trimmed.ends_with(".conf") {
        return Err(format!("Not a .conf file: {trimmed}"));
    }

    match trimmed.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => Ok(home.join(rest)),
            None => Err("Cannot resolve ~: home directory unknown".to_string()),
        },
        None => Ok(PathBuf::from(trimmed)),
    }
}
