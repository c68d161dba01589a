//! # Centralized Error Handling
//!
//! This module defines [`AppError`], the error type for configuration and
//! user-input problems shared across the workspace. Chain and submission
//! failures have their own taxonomy in `lib-evm`.
//!
//! ## Error Categories
//!
//! - [`Config`](AppError::Config) - missing or malformed environment, failed validation
//! - [`InvalidInput`](AppError::InvalidInput) - policy form values the user must correct
//! - [`Internal`](AppError::Internal) - unexpected failures
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_duration(raw: &str) -> Result<u64> {
//!     raw.parse().map_err(|_| AppError::InvalidInput("Duration must be a whole number".to_string()))
//! }
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Workspace-wide error type for configuration and input handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input validation error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get a user-friendly error message.
    ///
    /// Input errors are shown verbatim; everything else gets a generic message
    /// and the details go to the log.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Config(_) => "The dashboard is misconfigured. Check the logs.".to_string(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

/// Convert environment lookup failures into configuration errors.
impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
