//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function, task dispatch and completions
//! - `keys`: Key event handlers for UI modes
//! - `path_prompt`: Config path validation

pub(crate) mod keys;
pub(crate) mod path_prompt;
pub(crate) mod update;


use std::path::PathBuf;

use crate::message::Message;
use crate::state::TaskKind;
use tdemon_core::Environment;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Spawn a background task
    SpawnTask(Task),
}

/// Background work the event loop runs off the render thread
///
/// Each task reports back with exactly one completion [`Message`].
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Query the current tunnel session
    Probe,
    /// Bring up an environment, stopping any active session first
    Start(Environment),
    /// Bring down the active session
    Stop,
    /// Merge a user config against its environment template
    Merge(PathBuf),
    /// Load a merged config for the viewer
    ReadConfig(Environment),
    /// Write both environment templates into the config directory
    InstallTemplates,
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        TaskKind::from(self)
    }
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
