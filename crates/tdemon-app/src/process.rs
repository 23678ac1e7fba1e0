//! Message processing: runs the TEA update loop and dispatches actions

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::backend::TunnelBackend;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
///
/// Follow-up messages are processed in the same call; any action is handed
/// to [`handle_action`], which spawns the background task.
pub fn process_message<B>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    backend: &Arc<B>,
) where
    B: TunnelBackend + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), Arc::clone(backend));
        }

        msg = result.message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::WireGuardBackend;
    use crate::config::Settings;
    use crate::input_key::InputKey;
    use tdemon_daemon::test_utils::{wg_show_all, wg_show_interface, RecordingRunner};

    #[tokio::test]
    async fn test_start_round_trip_refreshes_status() {
        let temp = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.paths.config_dir = temp.path().to_path_buf();

        let runner = RecordingRunner::new();
        // Disconnected before bring-up, connected afterwards
        runner
            .respond_ok("wg show all", "")
            .respond_ok("wg show all", &wg_show_all(&["julo-prod"]));
        runner.respond_ok(
            "wg show julo-prod",
            &wg_show_interface("julo-prod", "34.101.166.184:51820", "45 seconds ago", "1 KiB received, 1 KiB sent"),
        );

        let backend = Arc::new(WireGuardBackend::with_runner(runner.clone(), &settings));
        let (tx, mut rx) = mpsc::channel(8);
        let mut state = AppState::with_settings(settings);

        process_message(&mut state, Message::Key(InputKey::Enter), &tx, &backend);
        assert!(state.is_loading());

        // SessionStarted queues a probe, whose result lands next
        let started = rx.recv().await.unwrap();
        assert!(matches!(started, Message::SessionStarted { .. }));
        process_message(&mut state, started, &tx, &backend);
        assert!(state.is_loading());

        let probed = rx.recv().await.unwrap();
        process_message(&mut state, probed, &tx, &backend);

        assert!(!state.is_loading());
        assert!(state.session.connected);
        assert_eq!(state.session.interface_name, "julo-prod");
        assert!(runner.position("wg-quick up julo-prod").is_some());
    }
}
