//! Test utilities for daemon types
//!
//! Provides [`RecordingRunner`], a scripted [`CommandRunner`] that records
//! every invocation, plus helpers for building `wg show` output.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tdemon_core::prelude::*;

use crate::runner::{command_line, CommandOutput, CommandRunner};

#[derive(Debug, Clone)]
enum ScriptedResponse {
    Output(CommandOutput),
    SpawnError,
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<String>,
    responses: HashMap<String, VecDeque<ScriptedResponse>>,
}

/// Command runner that replays scripted responses and records calls
///
/// Responses are keyed by the full command line (`"wg show all"`). Multiple
/// responses for one command are replayed in order; the last one repeats.
/// Unscripted commands succeed with empty output.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful exit with the given stdout
    pub fn respond_ok(&self, command: &str, stdout: &str) -> &Self {
        self.push(
            command,
            ScriptedResponse::Output(CommandOutput {
                code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        )
    }

    /// Script a non-zero exit with the given stderr
    pub fn respond_fail(&self, command: &str, code: i32, stderr: &str) -> &Self {
        self.push(
            command,
            ScriptedResponse::Output(CommandOutput {
                code: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
        )
    }

    /// Script a failure to launch the program at all
    pub fn respond_spawn_error(&self, command: &str) -> &Self {
        self.push(command, ScriptedResponse::SpawnError)
    }

    /// Every command line run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Index of the first call matching `command`
    pub fn position(&self, command: &str) -> Option<usize> {
        self.lock().calls.iter().position(|c| c == command)
    }

    /// Number of times `command` was run
    pub fn count(&self, command: &str) -> usize {
        self.lock().calls.iter().filter(|c| *c == command).count()
    }

    fn push(&self, command: &str, response: ScriptedResponse) -> &Self {
        self.lock()
            .responses
            .entry(command.to_string())
            .or_default()
            .push_back(response);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn next_response(&self, command: &str) -> Option<ScriptedResponse> {
        let mut inner = self.lock();
        inner.calls.push(command.to_string());
        let queue = inner.responses.get_mut(command)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command = command_line(program, args);
        match self.next_response(&command) {
            Some(ScriptedResponse::Output(output)) => Ok(output),
            Some(ScriptedResponse::SpawnError) => Err(Error::CommandSpawn {
                command,
                reason: "scripted spawn failure".to_string(),
            }),
            None => Ok(CommandOutput {
                code: Some(0),
                ..Default::default()
            }),
        }
    }
}

/// `wg show all` output listing the given interfaces
pub fn wg_show_all(interfaces: &[&str]) -> String {
    interfaces
        .iter()
        .map(|name| {
            format!(
                "interface: {}\n  public key: dGVzdA==\n  private key: (hidden)\n  listening port: 51820\n",
                name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `wg show <name>` output with one peer
pub fn wg_show_interface(name: &str, endpoint: &str, handshake: &str, transfer: &str) -> String {
    format!(
        "interface: {name}\n  public key: dGVzdA==\n  private key: (hidden)\n  listening port: 51820\n\n\
         peer: cGVlcg==\n  endpoint: {endpoint}\n  allowed ips: 10.80.0.0/16\n  \
         latest handshake: {handshake}\n  transfer: {transfer}\n"
    )
}
