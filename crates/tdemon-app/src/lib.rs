//! tdemon-app - Application state and orchestration for Tunnel Demon
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the background task layer that drives the tunnel backend,
//! settings loading, and the WireGuard configuration merge.

pub mod actions;
pub mod activity_log;
pub mod backend;
pub mod config;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use backend::{LocalTunnelBackend, TunnelBackend, WireGuardBackend};
pub use handler::{Task, UpdateAction, UpdateResult};
pub use message::Message;
pub use state::AppState;

// Re-export daemon types for TUI
pub use tdemon_daemon::ToolAvailability;
