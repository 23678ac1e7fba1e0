//! Tunnel Demon - switch between WireGuard tunnel environments
//!
//! This is the binary entry point. All logic lives in the library.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tdemon_app::config::{ConfigMerger, ConfigStore, Settings};
use tdemon_app::WireGuardBackend;
use tunnel_demon::headless;

/// Tunnel Demon - switch between WireGuard tunnel environments
#[derive(Parser, Debug)]
#[command(name = "tdemon")]
#[command(about = "A TUI for switching between WireGuard tunnel environments", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Install templates and merge the given user configs
    Setup {
        /// Production user config
        #[arg(long, value_name = "PATH")]
        prod: Option<PathBuf>,

        /// Non-production user config
        #[arg(long, value_name = "PATH")]
        nonprod: Option<PathBuf>,
    },

    /// Merge one user config into its environment
    UpdateConfig {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Print the current tunnel status
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn merger(settings: &Settings) -> ConfigMerger {
    let store = ConfigStore::new(
        settings.paths.config_dir.clone(),
        settings.paths.prefix(),
    );
    ConfigMerger::new(store, settings.endpoints.clone())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    let args = Args::parse();
    let settings = tunnel_demon::init()?;

    match args.command {
        None => tunnel_demon::run_tui(settings).await?,
        Some(Command::Setup { prod, nonprod }) => {
            headless::setup(
                &merger(&settings),
                prod.as_deref(),
                nonprod.as_deref(),
                &mut io::stdout(),
            )?;
        }
        Some(Command::UpdateConfig { path }) => {
            headless::update_config(&merger(&settings), &path, &mut io::stdout())?;
        }
        Some(Command::Status { json }) => {
            let backend = WireGuardBackend::from_settings(&settings);
            headless::status(&backend, json, &mut io::stdout()).await?;
        }
    }

    Ok(())
}
