//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to access {path}: {message}")]
    FileAccess { path: PathBuf, message: String },

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Tunnel Control Errors
    // ─────────────────────────────────────────────────────────────
    #[error("'{tool}' not found. Ensure WireGuard tools are installed and in your PATH.")]
    ToolNotFound { tool: String },

    #[error("Failed to run '{command}': {reason}")]
    CommandSpawn { command: String, reason: String },

    #[error("'{command}' timed out after {secs}s")]
    CommandTimeout { command: String, secs: u64 },

    #[error("{command} failed (exit code {code:?})\nOutput: {output}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Failed to stop current VPN ({interface}): {source}")]
    StopBeforeStart {
        interface: String,
        #[source]
        source: Box<Error>,
    },

    #[error("No active VPN interfaces found to stop")]
    NoActiveInterface,

    // ─────────────────────────────────────────────────────────────
    // Configuration Merge Errors
    // ─────────────────────────────────────────────────────────────
    #[error("User config file not found: {path}")]
    UserConfigNotFound { path: PathBuf },

    #[error("No Endpoint found in config file: {path}")]
    NoEndpointFound { path: PathBuf },

    #[error(
        "The config you specify ({path}) is not a recognized VPN config.\nPlease check with the infrastructure team."
    )]
    UnrecognizedEndpoint { path: PathBuf, endpoint: String },

    #[error("Template file not found: {path}. Run 'tdemon setup' first.")]
    TemplateMissing { path: PathBuf },

    #[error("Template {path} has no '{key}' line")]
    TemplateMalformed { path: PathBuf, key: String },

    #[error("Insufficient permissions to {operation} {path}.\n\n{remediation}")]
    PermissionDenied {
        operation: &'static str,
        path: PathBuf,
        remediation: String,
    },

    // ─────────────────────────────────────────────────────────────
    // Settings Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Coarse classification of errors
///
/// Travels with failure messages so the UI can suggest a next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User config does not belong to a known environment
    Classification,
    /// Installed template missing or malformed (setup incomplete)
    Template,
    /// `wg-quick` bring-up/bring-down failed
    Control,
    /// Filesystem access denied
    Permission,
    /// Everything else (IO, terminal, settings)
    Infrastructure,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn file_access(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FileAccess {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn command_failed(
        command: impl Into<String>,
        code: Option<i32>,
        output: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
            output: output.into(),
        }
    }

    pub fn stop_before_start(interface: impl Into<String>, source: Error) -> Self {
        Self::StopBeforeStart {
            interface: interface.into(),
            source: Box::new(source),
        }
    }

    /// Permission error carrying platform-specific remediation text
    ///
    /// `operation` is the verb shown to the user ("read", "write", ...).
    fn permission_denied(operation: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied {
            operation,
            path: path.into(),
            remediation: permission_remediation().to_string(),
        }
    }

    /// Map an IO error from `operation` on `path`, promoting permission failures
    pub fn from_io(operation: &'static str, path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(operation, path),
            _ => Self::file_access(path, err.to_string()),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnrecognizedEndpoint { .. } | Error::NoEndpointFound { .. } => {
                ErrorCategory::Classification
            }
            Error::TemplateMissing { .. } | Error::TemplateMalformed { .. } => {
                ErrorCategory::Template
            }
            Error::ToolNotFound { .. }
            | Error::CommandSpawn { .. }
            | Error::CommandTimeout { .. }
            | Error::CommandFailed { .. }
            | Error::StopBeforeStart { .. }
            | Error::NoActiveInterface => ErrorCategory::Control,
            Error::PermissionDenied { .. } => ErrorCategory::Permission,
            _ => ErrorCategory::Infrastructure,
        }
    }
}

/// Platform-specific advice for privilege failures
fn permission_remediation() -> &'static str {
    #[cfg(windows)]
    {
        "Please run as Administrator:\nRight-click Command Prompt -> 'Run as administrator'\nThen run: tdemon"
    }

    #[cfg(not(windows))]
    {
        "Please run with administrator privileges:\nsudo tdemon"
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }
}
