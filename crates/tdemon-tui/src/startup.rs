//! Startup checks for the TUI runner
//!
//! Seeds the activity log with tool and setup warnings and returns the
//! first message to process (an initial status refresh).

use tdemon_app::config::SetupStatus;
use tdemon_app::message::Message;
use tdemon_app::state::AppState;
use tdemon_app::ToolAvailability;
use tracing::{info, warn};

/// Record startup checks in `state` and return the initial message
pub fn initialize(state: &mut AppState, tools: ToolAvailability, setup: SetupStatus) -> Message {
    state.log.info("Tunnel Demon started");
    info!(
        config_dir = %state.settings.paths.config_dir.display(),
        "Tunnel Demon started"
    );

    if let Some(message) = tools.unavailable_message() {
        warn!("{message}");
        state.log.warning(message);
    }
    state.tool_availability = tools;

    if setup.needs_setup() {
        let missing: Vec<String> = setup
            .missing_files
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        warn!(missing = ?missing, "Setup needed");

        let mut message = String::from("Setup needed. Missing:");
        for path in &missing {
            message.push_str("\n  ");
            message.push_str(path);
        }
        if !setup.has_templates {
            message.push_str("\nPress 't' to install templates.");
        }
        message.push_str("\nThen choose Update Configuration, or run: sudo tdemon setup");
        state.log.warning(message);
    }
    state.setup_status = Some(setup);

    Message::RefreshStatus
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tdemon_app::activity_log::ActivityLevel;

    fn tools(available: bool) -> ToolAvailability {
        ToolAvailability {
            wg: available,
            wg_quick: available,
        }
    }

    fn ready_setup() -> SetupStatus {
        SetupStatus {
            has_templates: true,
            has_prod_config: true,
            has_nonprod_config: true,
            missing_files: Vec::new(),
        }
    }

    #[test]
    fn test_ready_system_logs_no_warnings() {
        let mut state = AppState::new();

        let msg = initialize(&mut state, tools(true), ready_setup());

        assert_eq!(msg, Message::RefreshStatus);
        assert!(state.tool_availability.all_available());
        assert!(state
            .log
            .entries()
            .iter()
            .all(|e| e.level != ActivityLevel::Warning));
    }

    #[test]
    fn test_missing_tools_warns() {
        let mut state = AppState::new();

        initialize(&mut state, tools(false), ready_setup());

        let warning = state.log.last().unwrap();
        assert_eq!(warning.level, ActivityLevel::Warning);
        assert!(warning.message.contains("wg, wg-quick"));
    }

    #[test]
    fn test_setup_needed_lists_missing_files() {
        let mut state = AppState::new();
        let setup = SetupStatus {
            has_templates: false,
            has_prod_config: false,
            has_nonprod_config: false,
            missing_files: vec![PathBuf::from("/etc/wireguard/julo-prod-template.conf")],
        };

        initialize(&mut state, tools(true), setup);

        let warning = state.log.last().unwrap();
        assert!(warning.message.contains("julo-prod-template.conf"));
        assert!(warning.message.contains("Press 't'"));
        assert!(state.setup_status.as_ref().unwrap().needs_setup());
    }
}
