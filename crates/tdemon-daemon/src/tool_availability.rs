//! Tool availability checking for tunnel control
//!
//! Checks whether the `wg` and `wg-quick` programs can be found on `PATH`
//! before the user tries to bring a tunnel up.

use crate::runner::WgTools;

/// Availability of the external WireGuard tools
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolAvailability {
    /// Whether the status tool (`wg`) is on PATH
    pub wg: bool,

    /// Whether the bring-up tool (`wg-quick`) is on PATH
    pub wg_quick: bool,
}

impl ToolAvailability {
    /// Check tool availability (run once at startup)
    pub fn check(tools: &WgTools) -> Self {
        Self {
            wg: Self::is_on_path(&tools.wg),
            wg_quick: Self::is_on_path(&tools.wg_quick),
        }
    }

    fn is_on_path(program: &str) -> bool {
        which::which(program)
            .inspect_err(|e| tracing::debug!("{} not found: {}", program, e))
            .is_ok()
    }

    pub fn all_available(&self) -> bool {
        self.wg && self.wg_quick
    }

    /// Get user-friendly message for missing tools
    pub fn unavailable_message(&self) -> Option<String> {
        let missing: Vec<&str> = [(self.wg, "wg"), (self.wg_quick, "wg-quick")]
            .into_iter()
            .filter(|(found, _)| !found)
            .map(|(_, name)| name)
            .collect();

        if missing.is_empty() {
            None
        } else {
            Some(format!(
                "WireGuard tools not found: {}. Install wireguard-tools to manage tunnels.",
                missing.join(", ")
            ))
        }
    }
}
