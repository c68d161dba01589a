//! # Table Components
//!
//! Grid tables for the example policy list.

use lib_core::dto::PolicyRow;

use crate::ui::theme::Theme;

/// Configuration for table styling
pub struct TableConfig {
    pub num_columns: usize,
    pub spacing: [f32; 2],
    pub striped: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            num_columns: 5,
            spacing: [24.0, 6.0],
            striped: true,
        }
    }
}

/// Render a data table with headers and rows
pub fn render_table<F>(
    ui: &mut egui::Ui,
    id: &str,
    config: TableConfig,
    headers: &[&str],
    theme: &Theme,
    render_rows: F,
) where
    F: FnOnce(&mut egui::Ui),
{
    egui::Grid::new(id)
        .num_columns(config.num_columns)
        .spacing(config.spacing)
        .striped(config.striped)
        .show(ui, |ui| {
            for header in headers {
                ui.colored_label(theme.accent, *header);
            }
            ui.end_row();

            render_rows(ui);
        });
}

/// Display cells for one policy row.
pub fn policy_cells(row: &PolicyRow) -> [String; 5] {
    [
        row.turbine_id.to_string(),
        format!("{}", row.policy_amount_eth),
        format!("{}", row.daily_premium_eth),
        row.latitude.to_string(),
        row.longitude.to_string(),
    ]
}

/// Example policy table. The rows are static and labelled as examples.
pub fn render_policy_table(ui: &mut egui::Ui, rows: &[PolicyRow], theme: &Theme) {
    theme.card().show(ui, |ui| {
        ui.label(egui::RichText::new("Policies").strong().color(theme.accent));
        ui.label(egui::RichText::new("Example data, not read from the chain").color(theme.dim));
        ui.add_space(6.0);

        render_table(
            ui,
            "example_policies",
            TableConfig::default(),
            &[
                "Turbine ID",
                "Policy Amount (ETH)",
                "Daily Premium (ETH)",
                "Latitude",
                "Longitude",
            ],
            theme,
            |ui| {
                for row in rows {
                    for cell in policy_cells(row) {
                        ui.label(cell);
                    }
                    ui.end_row();
                }
            },
        );
    });
}
