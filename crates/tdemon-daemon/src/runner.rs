//! Subprocess execution for the WireGuard command-line tools
//!
//! Every call to `wg` / `wg-quick` goes through a [`CommandRunner`] so the
//! probe and controller logic can be exercised against a scripted runner in
//! tests.

use std::process::Stdio;
use std::time::Duration;

use tdemon_core::prelude::*;
use tokio::process::Command;
use tokio::time::timeout;

/// Default timeout for a single tool invocation
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Default prefix for interfaces managed by this application
pub const DEFAULT_INTERFACE_PREFIX: &str = "julo-";

/// Program names for the external tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WgTools {
    /// Status query tool (`wg`)
    pub wg: String,
    /// Bring-up / bring-down tool (`wg-quick`)
    pub wg_quick: String,
}

impl Default for WgTools {
    fn default() -> Self {
        Self {
            wg: "wg".to_string(),
            wg_quick: "wg-quick".to_string(),
        }
    }
}

/// Captured result of a finished subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (`None` if terminated by a signal)
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout followed by stderr, as shown to the user on failure
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&self.stderr);
        }
        combined.trim_end().to_string()
    }
}

/// Render a program and its arguments as a single command line
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs external commands and captures their output
///
/// A non-zero exit is not an error at this level; callers decide what a
/// failed exit means. `Err` is reserved for spawn failures and timeouts.
#[trait_variant::make(CommandRunner: Send)]
pub trait LocalCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs commands as real child processes with a timeout
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command = command_line(program, args);
        debug!("Running: {}", command);

        // kill_on_drop reaps the child if the timeout fires
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = timeout(self.timeout, child)
            .await
            .map_err(|_| Error::CommandTimeout {
                command: command.clone(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::ToolNotFound {
                        tool: program.to_string(),
                    }
                } else {
                    Error::CommandSpawn {
                        command: command.clone(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        trace!("{} stdout: {}", command, result.stdout);
        if !result.stderr.is_empty() {
            debug!("{} stderr: {}", command, result.stderr);
        }

        Ok(result)
    }
}
