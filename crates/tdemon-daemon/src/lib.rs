//! # tdemon-daemon - WireGuard Tool Integration
//!
//! Drives the external `wg` / `wg-quick` programs: status probing,
//! duplicate-interface reconciliation and start/stop transitions.
//!
//! Depends on [`tdemon_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Subprocess Execution
//! - [`CommandRunner`] - Runs a tool and captures its output (test seam)
//! - [`SystemRunner`] - Real child processes with a timeout
//! - [`WgTools`] - Program names for `wg` / `wg-quick`
//!
//! ### Status Parsing
//! - [`managed_interfaces()`] - Managed interface names from `wg show all`
//! - [`parse_interface_status()`] - Session details from `wg show <iface>`
//! - [`parse_transfer()`], [`parse_handshake()`] - Field parsers
//!
//! ### Session Control
//! - [`SessionProbe`] - Never-failing status probe with reconciliation
//! - [`SessionController`] - `start(env)` / `stop()` with stop-before-start
//!
//! ### Platform Utilities
//! - [`ToolAvailability`] - Check for `wg` and `wg-quick` on PATH

pub mod controller;
pub mod probe;
pub mod runner;
pub mod status;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod tool_availability;

// Public API re-exports
pub use controller::SessionController;
pub use probe::SessionProbe;
pub use runner::{
    command_line, CommandOutput, CommandRunner, LocalCommandRunner, SystemRunner, WgTools,
    DEFAULT_COMMAND_TIMEOUT, DEFAULT_INTERFACE_PREFIX,
};
pub use status::{
    managed_interfaces, parse_bytes, parse_handshake, parse_interface_status, parse_transfer,
};
pub use tool_availability::ToolAvailability;
