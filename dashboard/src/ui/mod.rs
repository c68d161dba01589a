//! # GUI Rendering
//!
//! Draws one frame from a snapshot of [`AppState`](crate::app::AppState).
//! Widgets never call into the app directly; they push [`UiAction`]s that
//! are dispatched after the frame is laid out.

pub mod chart;
pub mod theme;
pub mod widgets;

use crate::app::App;
use theme::Theme;

/// A click collected during rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ConnectWallet,
    DisconnectWallet,
    SubmitPolicy,
    PayPremium,
    RefreshWind,
}

/// Main render function - called every frame by eframe
pub fn render(ctx: &egui::Context, app: &mut App, _frame: &mut eframe::Frame) {
    let mut state = match app.state.try_read() {
        Some(guard) => guard.clone(),
        // A task holds the lock; draw next frame
        None => {
            ctx.request_repaint();
            return;
        }
    };

    let theme = Theme::default();
    let config = app.config().clone();
    let mut actions = Vec::new();
    let mut form_changed = false;

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(4.0);
        widgets::wallet_bar::render_wallet_bar(ui, &state, &theme, &mut actions);
        ui.add_space(4.0);
    });

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        widgets::status_bar::render_status_bar(ui, &state, &config, &theme);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.columns(2, |columns| {
                chart::render_wind_chart(&mut columns[0], &state.wind_cycle, &theme);
                widgets::summary_card::render_summary_card(&mut columns[1], &state, &theme, &mut actions);
            });

            ui.add_space(12.0);
            widgets::tables::render_policy_table(ui, &state.example_policies, &theme);
            ui.add_space(12.0);

            theme.card().show(ui, |ui| {
                let form_error = state.form_error.clone();
                form_changed = widgets::forms::render_policy_form(
                    ui,
                    &mut state.form,
                    config.bind_form,
                    form_error.as_deref(),
                    &theme,
                );
                ui.add_space(8.0);

                let preview = lib_core::dto::resolve_parameters(&config, &state.form).ok();
                widgets::submission::render_submit_section(ui, &state, preview.as_ref(), &theme, &mut actions);
            });
        });
    });

    // Form edits are written back before any click reads them
    if form_changed {
        let mut shared = app.state.write();
        shared.form = state.form.clone();
        shared.form_error = None;
    }

    for action in actions {
        tracing::debug!(?action, "UI action");
        match action {
            UiAction::ConnectWallet => app.handle_wallet_connect_click(),
            UiAction::DisconnectWallet => app.handle_wallet_disconnect_click(),
            UiAction::SubmitPolicy => {
                app.handle_submit_click();
            }
            UiAction::PayPremium => app.handle_pay_premium_click(),
            UiAction::RefreshWind => app.handle_refresh_wind_click(),
        }
    }
}
