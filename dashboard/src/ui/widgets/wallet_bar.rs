//! # Wallet Bar
//!
//! Header with the dashboard title and the wallet connect control.

use lib_evm::wallet::short_address;
use lib_evm::WalletStatus;

use crate::app::AppState;
use crate::ui::theme::Theme;
use crate::ui::UiAction;

/// Text next to the wallet button.
pub fn wallet_label(status: &WalletStatus, chain_id: Option<u64>) -> String {
    match (status, chain_id) {
        (WalletStatus::Connected(addr), Some(chain_id)) => {
            format!("{} (chain {})", short_address(addr), chain_id)
        }
        (WalletStatus::Connected(addr), None) => short_address(addr),
        (other, _) => other.to_string(),
    }
}

pub fn render_wallet_bar(ui: &mut egui::Ui, state: &AppState, theme: &Theme, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new("Wind Farm Insurance").color(theme.accent).strong());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let status = state.wallet.status();
            let label = wallet_label(status, state.wallet.chain_id());

            match status {
                WalletStatus::Connected(_) => {
                    if ui.button("Disconnect").clicked() {
                        actions.push(UiAction::DisconnectWallet);
                    }
                    ui.label(egui::RichText::new(label).color(theme.success));
                }
                WalletStatus::Connecting => {
                    ui.add_enabled(false, egui::Button::new("Connect Wallet"));
                    ui.spinner();
                    ui.label(egui::RichText::new(label).color(theme.dim));
                }
                WalletStatus::Disconnected | WalletStatus::Error(_) => {
                    if ui.button("Connect Wallet").clicked() {
                        actions.push(UiAction::ConnectWallet);
                    }
                    let color = if matches!(status, WalletStatus::Error(_)) {
                        theme.error
                    } else {
                        theme.dim
                    };
                    ui.label(egui::RichText::new(label).color(color));
                }
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;

    #[test]
    fn test_wallet_label() {
        let addr = Address::new([0x11; 20]);
        assert_eq!(wallet_label(&WalletStatus::Disconnected, None), "Disconnected");
        assert_eq!(
            wallet_label(&WalletStatus::Connected(addr), Some(11_155_111)),
            "0x1111…1111 (chain 11155111)"
        );
        assert_eq!(wallet_label(&WalletStatus::Connected(addr), None), "0x1111…1111");
        assert!(wallet_label(&WalletStatus::Error("no accounts".into()), None).contains("no accounts"));
    }
}
