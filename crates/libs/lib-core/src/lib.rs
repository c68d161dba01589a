//! # Core Library
//!
//! Configuration, error types, and policy/dashboard data models shared by the
//! chain library, the dashboard, and the deployment CLI.

pub mod config;
pub mod dto;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use dto::{PolicyForm, PolicyParameters};
pub use error::{AppError, Result};
