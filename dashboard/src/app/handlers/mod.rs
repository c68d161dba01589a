//! # Event Handlers
//!
//! User action handlers that only touch state or start a single task.

pub mod wallet;
