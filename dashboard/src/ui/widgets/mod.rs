//! # Dashboard Widgets

pub mod forms;
pub mod status_bar;
pub mod submission;
pub mod summary_card;
pub mod tables;
pub mod wallet_bar;
