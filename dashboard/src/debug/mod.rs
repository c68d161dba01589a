//! # Debugging and Tracing
//!
//! File-based logging for the dashboard. Every chain task runs inside a
//! tracing span, so a submission can be followed through the log by its
//! `attempt_id`.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `dashboard=debug,lib_evm=debug`)
//! - `DASHBOARD_LOG_DIR`: Log directory (default: `logs`)

pub mod config;
pub mod logger;

pub use config::DebugConfig;

/// Initialize logging. Call once, before the window opens.
pub fn init() {
    logger::init();
}
