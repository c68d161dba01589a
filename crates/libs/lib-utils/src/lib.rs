//! # Utilities Library
//!
//! Shared utility functions for environment variables, time formatting, and input validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_bool, get_env_or, get_env_parse_or};
pub use time::{format_clock, now_utc};
pub use validation::{validate_decimal_in_range, validate_not_empty, validate_positive_int};
