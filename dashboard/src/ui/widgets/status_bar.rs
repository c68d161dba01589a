//! # Status Bar Widget
//!
//! Bottom bar with the last status message, deployer address and update time.

use lib_core::Config;

use crate::app::AppState;
use crate::ui::theme::Theme;

pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState, config: &Config, theme: &Theme) {
    ui.horizontal(|ui| {
        let message = state.status_message.as_deref().unwrap_or("Ready");
        ui.label(message);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!("Last: {}", lib_utils::format_clock(state.last_update)))
                    .color(theme.dim),
            );
            ui.separator();
            ui.label(egui::RichText::new(format!("Deployer {}", config.deployer_address)).color(theme.dim));
        });
    });
}
