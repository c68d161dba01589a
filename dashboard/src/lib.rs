//! # Wind Farm Insurance Dashboard
//!
//! Native egui dashboard for parametric wind-farm insurance. It shows the
//! wind cycle and example policies, connects a wallet, and creates policies
//! through the on-chain deployer contract.
//!
//! ## Module Structure
//!
//! - [`app`]: state, events, and the background tasks that talk to the chain
//! - [`ui`]: per-frame rendering
//! - [`debug`]: file logging
//!
//! Chain access lives in `lib-evm`; policy parameters and configuration in
//! `lib-core`.

pub mod app;
pub mod debug;
pub mod ui;

pub use app::{App, AppEvent, AppState};
