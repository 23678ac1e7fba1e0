//! Main update function - handles state transitions (TEA pattern)
//!
//! Operation requests go through [`dispatch`], which enforces a single
//! outstanding task. Completion messages release the task slot, and
//! successful Start/Stop/Merge completions immediately queue a fresh probe.
//!
//! `status_message` holds the last outcome; the in-flight task is shown
//! by the status line itself.

use std::path::Path;
use std::time::Instant;

use crate::message::{Message, TaskError};
use crate::state::AppState;
use tdemon_core::{Environment, ErrorCategory, TunnelSession};
use tracing::{debug, info, warn};

use super::{keys::handle_key, path_prompt::validate_config_path, Task, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            if state.is_loading() {
                state.spinner_frame = state.spinner_frame.wrapping_add(1);
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation Messages
        // ─────────────────────────────────────────────────────────
        Message::MenuUp => {
            state.menu_up();
            UpdateResult::none()
        }
        Message::MenuDown => {
            state.menu_down();
            UpdateResult::none()
        }
        Message::MenuSelect => {
            let item = state.selected_menu_item();
            if item.is_operation() && state.is_loading() {
                return UpdateResult::none();
            }
            UpdateResult::message(item.message())
        }
        Message::FocusNext => {
            state.focus = state.focus.next();
            UpdateResult::none()
        }
        Message::LogScrollUp => {
            state.log.scroll_up();
            UpdateResult::none()
        }
        Message::LogScrollDown => {
            state.log.scroll_down();
            UpdateResult::none()
        }
        Message::ConfigScrollUp => {
            if let Some(view) = state.config_view.as_mut() {
                view.scroll_up();
            }
            UpdateResult::none()
        }
        Message::ConfigScrollDown => {
            if let Some(view) = state.config_view.as_mut() {
                view.scroll_down();
            }
            UpdateResult::none()
        }
        Message::ClosePanel => {
            state.close_panel();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Operation Requests
        // ─────────────────────────────────────────────────────────
        Message::StartSession(env) => dispatch(state, Task::Start(env)),
        Message::StopSession => dispatch(state, Task::Stop),
        Message::RefreshStatus => dispatch(state, Task::Probe),
        Message::ViewConfig(env) => dispatch(state, Task::ReadConfig(env)),
        Message::InstallTemplates => dispatch(state, Task::InstallTemplates),
        Message::OpenPathPrompt => {
            if state.is_loading() {
                return UpdateResult::none();
            }
            state.open_path_prompt();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Path Prompt Messages
        // ─────────────────────────────────────────────────────────
        Message::PathInput(c) => {
            state.path_prompt.input.push(c);
            state.path_prompt.error = None;
            UpdateResult::none()
        }
        Message::PathBackspace => {
            state.path_prompt.input.pop();
            state.path_prompt.error = None;
            UpdateResult::none()
        }
        Message::PathClear => {
            state.path_prompt.clear();
            UpdateResult::none()
        }
        Message::PathSubmit => match validate_config_path(&state.path_prompt.input) {
            Ok(path) => {
                state.close_panel();
                UpdateResult::message(Message::ConfigPathSelected(path))
            }
            Err(error) => {
                state.path_prompt.error = Some(error);
                UpdateResult::none()
            }
        },
        Message::ConfigPathSelected(path) => {
            state
                .log
                .info(format!("Processing config: {}", path.display()));
            dispatch(state, Task::Merge(path))
        }

        // ─────────────────────────────────────────────────────────
        // Task Completion Messages
        // ─────────────────────────────────────────────────────────
        Message::StatusProbed { session } => {
            state.finish_task();
            handle_status_probed(state, session);
            UpdateResult::none()
        }

        Message::SessionStarted { env } => {
            state.finish_task();
            succeed(state, format!("{} session started", env.display_name()));
            refresh_after_success(state)
        }
        Message::SessionStartFailed { env, error } => {
            state.finish_task();
            fail(
                state,
                &format!("Failed to start {}", env.display_name()),
                &error,
            );
            UpdateResult::none()
        }

        Message::SessionStopped => {
            state.finish_task();
            succeed(state, "Session stopped".to_string());
            refresh_after_success(state)
        }
        Message::SessionStopFailed { error } => {
            state.finish_task();
            fail(state, "Failed to stop session", &error);
            UpdateResult::none()
        }

        Message::ConfigMerged { env, path } => {
            state.finish_task();
            if let Some(status) = state.setup_status.as_mut() {
                match env {
                    Environment::Production => status.has_prod_config = true,
                    Environment::NonProduction => status.has_nonprod_config = true,
                }
            }
            succeed(
                state,
                format!(
                    "{} config updated from {}",
                    env.display_name(),
                    file_name(&path)
                ),
            );
            refresh_after_success(state)
        }
        Message::ConfigMergeFailed { path, error } => {
            state.finish_task();
            fail(
                state,
                &format!("Failed to process {}", file_name(&path)),
                &error,
            );
            UpdateResult::none()
        }

        Message::ConfigLoaded { env, contents } => {
            state.finish_task();
            state.status_message = None;
            state.show_config(env, contents);
            UpdateResult::none()
        }
        Message::ConfigLoadFailed { env, error } => {
            state.finish_task();
            fail(
                state,
                &format!("Cannot show {} config", env.display_name()),
                &error,
            );
            UpdateResult::none()
        }

        Message::TemplatesInstalled => {
            state.finish_task();
            if let Some(status) = state.setup_status.as_mut() {
                status.has_templates = true;
            }
            succeed(state, "Templates installed".to_string());
            UpdateResult::none()
        }
        Message::TemplatesInstallFailed { error } => {
            state.finish_task();
            fail(state, "Failed to install templates", &error);
            UpdateResult::none()
        }
    }
}

/// Claim the task slot and hand `task` to the event loop
///
/// Rejected (with a debug log) while another task is outstanding.
pub(crate) fn dispatch(state: &mut AppState, task: Task) -> UpdateResult {
    let kind = task.kind();
    if !state.begin_task(kind) {
        debug!(?task, in_flight = ?state.in_flight, "Task rejected: another task is running");
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::SpawnTask(task))
}

/// Queue the status refresh that follows a successful Start/Stop/Merge
///
/// Its result updates the session but leaves the outcome text in place.
fn refresh_after_success(state: &mut AppState) -> UpdateResult {
    let result = dispatch(state, Task::Probe);
    if result.action.is_some() {
        state.keep_status_on_refresh = true;
    }
    result
}

fn handle_status_probed(state: &mut AppState, session: TunnelSession) {
    let changed = state.session.connected != session.connected
        || state.session.interface_name != session.interface_name;

    if !std::mem::take(&mut state.keep_status_on_refresh) {
        state.status_message = Some(if session.connected {
            format!("Connected to {}", session.interface_name)
        } else {
            "Disconnected".to_string()
        });
    }

    if changed {
        info!(
            connected = session.connected,
            interface = %session.interface_name,
            "Session changed"
        );
        if session.connected {
            let env = session
                .environment
                .map(|env| env.display_name())
                .unwrap_or("Unknown");
            state.log.info(format!(
                "Connected: {} ({})",
                session.interface_name, env
            ));
        } else if state.session.connected {
            state.log.info("Disconnected");
        }
    }

    state.session = session;
    state.last_probe = Some(Instant::now());
}

fn succeed(state: &mut AppState, message: String) {
    info!("{message}");
    state.log.success(format!("✅ {message}"));
    state.status_message = Some(message);
}

/// One-line status plus the full error text in the activity log
fn fail(state: &mut AppState, context: &str, error: &TaskError) {
    warn!(category = ?error.category, "{context}: {}", error.message);
    let first_line = error.message.lines().next().unwrap_or_default();
    state.status_message = Some(format!("{context}: {first_line}"));
    state.log.error(format!("❌ {context}: {}", error.message));
    if let Some(hint) = next_step(error.category) {
        state.log.warning(hint);
    }
}

/// What the user can do about a failure of this kind
fn next_step(category: ErrorCategory) -> Option<&'static str> {
    match category {
        ErrorCategory::Template => Some("Press 't' to install the templates, then try again."),
        ErrorCategory::Classification => {
            Some("Only configs issued by the infrastructure team can be used. Please check with them.")
        }
        // Permission errors carry their own remediation
        ErrorCategory::Permission | ErrorCategory::Control | ErrorCategory::Infrastructure => None,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
