//! # Summary Card
//!
//! Latest wind speed plus the follow-up actions on the last created policy.

use crate::app::{ActionState, AppState};
use crate::ui::theme::Theme;
use crate::ui::UiAction;

/// One-line description of a follow-up action, `None` while idle.
pub fn action_text(action: &ActionState) -> Option<String> {
    match action {
        ActionState::Idle => None,
        ActionState::Pending => Some("Waiting for confirmation...".to_string()),
        ActionState::Done(msg) => Some(msg.clone()),
        ActionState::Failed(msg) => Some(format!("Failed: {}", msg)),
    }
}

fn render_action_state(ui: &mut egui::Ui, action: &ActionState, theme: &Theme) {
    let Some(text) = action_text(action) else {
        return;
    };
    let color = match action {
        ActionState::Failed(_) => theme.error,
        ActionState::Done(_) => theme.success,
        _ => theme.dim,
    };
    ui.horizontal(|ui| {
        if action.is_pending() {
            ui.spinner();
        }
        ui.label(egui::RichText::new(text).color(color));
    });
}

pub fn render_summary_card(ui: &mut egui::Ui, state: &AppState, theme: &Theme, actions: &mut Vec<UiAction>) {
    theme.card().show(ui, |ui| {
        ui.label(egui::RichText::new("Latest Wind Speed").strong().color(theme.accent));
        ui.label(
            egui::RichText::new(format!("{:.1} km/h", state.latest_wind.speed_kmh))
                .size(32.0)
                .strong(),
        );
        ui.label(egui::RichText::new(state.latest_wind.refresh_note).color(theme.dim));

        ui.add_space(10.0);
        ui.separator();

        let Some(last) = &state.last_policy else {
            ui.label(egui::RichText::new("Create a policy to pay premiums and read the oracle.").color(theme.dim));
            return;
        };

        ui.label(format!("Policy {}", last.handle.address()));
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let pay = egui::Button::new(format!("Pay Daily Premium ({} ETH)", last.params.daily_premium_eth()));
            if ui.add_enabled(state.can_pay_premium(), pay).clicked() {
                actions.push(UiAction::PayPremium);
            }
            if ui
                .add_enabled(state.can_refresh_wind(), egui::Button::new("Refresh Wind Speed"))
                .clicked()
            {
                actions.push(UiAction::RefreshWind);
            }
        });

        render_action_state(ui, &state.premium, theme);
        render_action_state(ui, &state.wind_refresh, theme);
    });
}
