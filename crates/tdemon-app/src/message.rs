//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use crate::input_key::InputKey;
use tdemon_core::{Environment, Error, ErrorCategory, TunnelSession};

/// Failure reported by a background task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskError {
    /// Full error text, including any captured tool output
    pub message: String,
    pub category: ErrorCategory,
}

impl TaskError {
    pub fn new(message: impl Into<String>, category: ErrorCategory) -> Self {
        Self {
            message: message.into(),
            category,
        }
    }
}

impl From<&Error> for TaskError {
    fn from(error: &Error) -> Self {
        Self::new(error.to_string(), error.category())
    }
}

/// All possible messages/actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (spinner)
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Navigation Messages
    // ─────────────────────────────────────────────────────────
    MenuUp,
    MenuDown,
    /// Activate the highlighted menu item
    MenuSelect,
    /// Cycle focus between the menu and the activity log
    FocusNext,
    LogScrollUp,
    LogScrollDown,
    ConfigScrollUp,
    ConfigScrollDown,
    /// Close the path prompt or config viewer
    ClosePanel,

    // ─────────────────────────────────────────────────────────
    // Operation Requests
    // ─────────────────────────────────────────────────────────
    StartSession(Environment),
    StopSession,
    RefreshStatus,
    /// Open the config path prompt
    OpenPathPrompt,
    ViewConfig(Environment),
    InstallTemplates,

    // ─────────────────────────────────────────────────────────
    // Path Prompt Messages
    // ─────────────────────────────────────────────────────────
    PathInput(char),
    PathBackspace,
    PathClear,
    /// Validate the typed path and emit `ConfigPathSelected`
    PathSubmit,
    /// A user config file was chosen
    ConfigPathSelected(PathBuf),

    // ─────────────────────────────────────────────────────────
    // Task Completion Messages
    // ─────────────────────────────────────────────────────────
    StatusProbed {
        session: TunnelSession,
    },
    SessionStarted {
        env: Environment,
    },
    SessionStartFailed {
        env: Environment,
        error: TaskError,
    },
    SessionStopped,
    SessionStopFailed {
        error: TaskError,
    },
    ConfigMerged {
        env: Environment,
        path: PathBuf,
    },
    ConfigMergeFailed {
        path: PathBuf,
        error: TaskError,
    },
    ConfigLoaded {
        env: Environment,
        contents: String,
    },
    ConfigLoadFailed {
        env: Environment,
        error: TaskError,
    },
    TemplatesInstalled,
    TemplatesInstallFailed {
        error: TaskError,
    },
}
