//! # tdemon-core - Core Domain Types
//!
//! Foundation crate for Tunnel Demon. Provides domain types, error handling
//! and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Environment`] - Production / Non-Production deployment context
//! - [`TunnelSession`] - Observed tunnel state from the last probe
//! - [`AppPhase`] - Application lifecycle phase
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum, sectioned by layer
//! - [`ErrorCategory`] - Coarse kind carried to the UI for follow-up hints
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use tdemon_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod prelude;
pub mod types;

pub use error::{Error, ErrorCategory, Result, ResultExt};
pub use types::{format_bytes, AppPhase, Environment, TunnelSession};
