//! # Form Components
//!
//! The "Create New Policy" form and its input helpers.

use lib_core::PolicyForm;

use crate::ui::theme::Theme;

const INPUT_WIDTH: f32 = 220.0;

/// Render a labelled single-line text input
pub fn render_text_input(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) -> egui::Response {
    ui.label(label);
    let response = ui.add_sized(
        [INPUT_WIDTH, 22.0],
        egui::TextEdit::singleline(value).hint_text(hint),
    );
    ui.end_row();
    response
}

/// Render an error message
pub fn render_error(ui: &mut egui::Ui, error: &str, theme: &Theme) {
    ui.label(egui::RichText::new(error).color(theme.error));
}

/// Render a help/hint text
pub fn render_hint(ui: &mut egui::Ui, hint: &str, theme: &Theme) {
    ui.label(egui::RichText::new(hint).color(theme.dim));
}

/// Edit `form` in place. Returns true when any field changed this frame.
pub fn render_policy_form(
    ui: &mut egui::Ui,
    form: &mut PolicyForm,
    bind_form: bool,
    error: Option<&str>,
    theme: &Theme,
) -> bool {
    let mut changed = false;

    ui.label(egui::RichText::new("Create New Policy").strong().color(theme.accent));
    if !bind_form {
        render_hint(
            ui,
            "Policies are created with the preset parameters; these fields are not sent.",
            theme,
        );
    }
    ui.add_space(6.0);

    egui::Grid::new("policy_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            changed |= render_text_input(ui, "Latitude", &mut form.latitude, "49.703168").changed();
            changed |= render_text_input(ui, "Longitude", &mut form.longitude, "-125.630035").changed();
            changed |= render_text_input(ui, "Duration of Policy (days)", &mut form.duration, "300").changed();
            changed |= render_text_input(
                ui,
                "Turbine Manufacturer",
                &mut form.turbine_manufacturer,
                "Vestas",
            )
            .changed();
            changed |= render_text_input(ui, "Age of Turbines (years)", &mut form.turbine_age, "5").changed();

            ui.label("Ice Protection");
            changed |= ui.checkbox(&mut form.ice_protection, "").changed();
            ui.end_row();

            ui.label("Fire Suppression");
            changed |= ui.checkbox(&mut form.fire_suppression, "").changed();
            ui.end_row();
        });

    if let Some(error) = error {
        ui.add_space(4.0);
        render_error(ui, error, theme);
    }

    changed
}
