//! # Wallet Handlers
//!
//! Connect and disconnect the wallet.

use std::sync::Arc;

use async_channel::Sender;
use lib_evm::WalletStatus;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::app::events::AppEvent;
use crate::app::state::AppState;

/// Handle wallet connect button click
///
/// Internal handler function - use [`crate::app::App::handle_wallet_connect_click`] instead.
pub(crate) fn handle_wallet_connect_click(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let mut wallet = {
        let mut state = state.write();
        if matches!(state.wallet.status(), WalletStatus::Connecting) {
            debug!("Wallet connection already in progress");
            return;
        }
        state.wallet.set_status(WalletStatus::Connecting, None);
        state.wallet.clone()
    }; // Drop the lock guard before spawning

    tokio::spawn(async move {
        let result = match wallet.connect().await {
            Ok(account) => Ok((account, wallet.chain_id())),
            Err(e) => Err(e.to_string()),
        };
        let _ = event_tx.send(AppEvent::WalletConnected(result)).await;
    });
}

/// Handle wallet disconnect button click
///
/// The last created policy stays visible; premium payment needs a reconnect.
pub(crate) fn handle_wallet_disconnect_click(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    state.wallet.disconnect();
    state.set_status("Wallet disconnected");
    info!("Wallet disconnected by user");
}
