//! # Data Transfer Objects (DTOs)
//!
//! Policy inputs that cross the chain boundary and the static datasets the
//! dashboard widgets display.

pub mod dashboard;
pub mod policy;

pub use dashboard::*;
pub use policy::*;
