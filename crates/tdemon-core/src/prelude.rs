//! Prelude for common imports used throughout all Tunnel Demon crates

pub use crate::error::{Error, ErrorCategory, Result, ResultExt};
pub use tracing::{debug, error, info, instrument, trace, warn};
