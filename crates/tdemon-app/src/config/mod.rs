//! Configuration for Tunnel Demon
//!
//! Two unrelated kinds of configuration live here:
//! - `config.toml` - application settings (`settings`, `types`)
//! - WireGuard `.conf` files - templates, merged configs and the merge
//!   itself (`templates`, `store`, `merger`, `viewer`, `setup`)

pub mod merger;
pub mod settings;
pub mod setup;
pub mod store;
pub mod templates;
pub mod types;
pub mod viewer;

pub use merger::{extract_endpoint, merge_lines, ConfigMerger};
pub use settings::{load_settings, load_settings_from, settings_path, CONFIG_ENV};
pub use setup::{check_setup_status, SetupStatus};
pub use store::ConfigStore;
pub use templates::ConfigTemplate;
pub use types::*;
pub use viewer::redact_config;
