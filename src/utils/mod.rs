//! Utility modules
//!
//! Provides logging initialization with per-run log rotation.

pub mod logging;

pub use logging::init_logging;
