//! # Async Tasks
//!
//! Background work that talks to the chain and reports back via `AppEvent`.

pub mod policy;
