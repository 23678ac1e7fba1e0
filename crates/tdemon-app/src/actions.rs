//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::backend::TunnelBackend;
use crate::handler::{Task, UpdateAction};
use crate::message::{Message, TaskError};

/// Execute an action by spawning a background task
///
/// The spawned task sends exactly one completion message on `msg_tx`.
pub fn handle_action<B>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, backend: Arc<B>)
where
    B: TunnelBackend + Sync + 'static,
{
    match action {
        UpdateAction::SpawnTask(task) => {
            tokio::spawn(async move {
                let msg = execute_task(task, backend.as_ref()).await;
                if msg_tx.send(msg).await.is_err() {
                    debug!("Task completed after the event loop closed");
                }
            });
        }
    }
}

/// Run one task against the backend and build its completion message
pub async fn execute_task<B: TunnelBackend>(task: Task, backend: &B) -> Message {
    debug!(?task, "Executing task");
    match task {
        Task::Probe => Message::StatusProbed {
            session: backend.probe().await,
        },

        Task::Start(env) => match backend.start(env).await {
            Ok(()) => Message::SessionStarted { env },
            Err(e) => {
                warn!("Start {} failed: {}", env, e);
                Message::SessionStartFailed {
                    env,
                    error: TaskError::from(&e),
                }
            }
        },

        Task::Stop => match backend.stop().await {
            Ok(()) => Message::SessionStopped,
            Err(e) => {
                warn!("Stop failed: {}", e);
                Message::SessionStopFailed {
                    error: TaskError::from(&e),
                }
            }
        },

        Task::Merge(path) => match backend.merge_config(path.clone()).await {
            Ok(env) => Message::ConfigMerged { env, path },
            Err(e) => {
                warn!("Merge of {} failed: {}", path.display(), e);
                Message::ConfigMergeFailed {
                    path,
                    error: TaskError::from(&e),
                }
            }
        },

        Task::ReadConfig(env) => match backend.read_config(env).await {
            Ok(contents) => Message::ConfigLoaded { env, contents },
            Err(e) => Message::ConfigLoadFailed {
                env,
                error: TaskError::from(&e),
            },
        },

        Task::InstallTemplates => match backend.install_templates().await {
            Ok(()) => Message::TemplatesInstalled,
            Err(e) => Message::TemplatesInstallFailed {
                error: TaskError::from(&e),
            },
        },
    }
}
