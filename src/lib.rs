//! Tunnel Demon Library
//!
//! A TUI for switching between the production and non-production
//! WireGuard tunnels. The binary (`tdemon`) parses arguments and calls into
//! the entry points here; headless subcommands live in [`headless`].

pub mod headless;

use tdemon_app::config::{load_settings, Settings};
use tdemon_core::prelude::*;

/// Install error reporting and file logging
///
/// Logging goes to a file because the TUI owns stdout.
pub fn init() -> Result<Settings> {
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    tdemon_core::logging::init()?;
    debug!(version = env!("CARGO_PKG_VERSION"), "Loading settings");

    Ok(load_settings())
}

/// Run the interactive TUI
pub async fn run_tui(settings: Settings) -> Result<()> {
    info!(
        config_dir = %settings.paths.config_dir.display(),
        prefix = %settings.paths.prefix(),
        "Starting TUI"
    );

    let result = tdemon_tui::run(settings).await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }
    result
}
