//! Main TUI runner - entry points and event loop
//!
//! - `run`: production entry point backed by `wg` / `wg-quick`
//! - `run_with_backend`: same, with any [`TunnelBackend`]
//! - `run_loop`: drain completions, render, poll input

use std::sync::Arc;

use tokio::sync::mpsc;

use tdemon_app::config::{check_setup_status, ConfigStore, Settings};
use tdemon_app::message::Message;
use tdemon_app::process::process_message;
use tdemon_app::signals;
use tdemon_app::state::AppState;
use tdemon_app::{ToolAvailability, TunnelBackend, WireGuardBackend};
use tdemon_core::prelude::*;

use crate::{event, render, startup, terminal};

/// Run the TUI against the system WireGuard tools
pub async fn run(settings: Settings) -> Result<()> {
    let backend = Arc::new(WireGuardBackend::from_settings(&settings));
    run_with_backend(settings, backend).await
}

/// Run the TUI with an explicit backend
pub async fn run_with_backend<B>(settings: Settings, backend: Arc<B>) -> Result<()>
where
    B: TunnelBackend + Sync + 'static,
{
    terminal::install_panic_hook();

    let store = ConfigStore::new(
        settings.paths.config_dir.clone(),
        settings.paths.prefix(),
    );
    let tools = ToolAvailability::check(&settings.tools.wg_tools());
    let setup = check_setup_status(&store);

    let mut state = AppState::with_settings(settings);
    let initial = startup::initialize(&mut state, tools, setup);

    // Completion messages from background tasks and the signal handler
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    signals::spawn_signal_handler(msg_tx.clone());

    let mut term = ratatui::init();

    process_message(&mut state, initial, &msg_tx, &backend);
    let result = run_loop(&mut term, &mut state, msg_rx, msg_tx, &backend);

    ratatui::restore();
    info!("Tunnel Demon exiting");
    result
}

/// Main event loop
///
/// Each iteration drains pending completions, renders once, then waits up
/// to [`event::POLL_INTERVAL`] for input (a timeout yields `Tick`).
fn run_loop<B>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: mpsc::Sender<Message>,
    backend: &Arc<B>,
) -> Result<()>
where
    B: TunnelBackend + Sync + 'static,
{
    while !state.should_quit() {
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, &msg_tx, backend);
        }

        terminal
            .draw(|frame| render::view(frame, state))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll()? {
            process_message(state, message, &msg_tx, backend);
        }
    }

    Ok(())
}
