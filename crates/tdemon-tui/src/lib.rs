//! tdemon-tui - Terminal UI for Tunnel Demon
//!
//! This crate provides the ratatui-based terminal interface. It owns the
//! terminal, polls input, and renders [`tdemon_app::AppState`]; all state
//! transitions happen in `tdemon-app`.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod startup;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use runner::{run, run_with_backend};
