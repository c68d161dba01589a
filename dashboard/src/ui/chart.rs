//! # Wind Cycle Chart
//!
//! Line chart of the current hourly wind cycle using egui_plot.

use egui_plot::{Line, Plot, PlotPoints};
use lib_core::dto::WindSample;

use crate::ui::theme::Theme;

/// `[minute, km/h]` pairs for the plot.
pub fn wind_points(samples: &[WindSample]) -> Vec<[f64; 2]> {
    samples
        .iter()
        .map(|s| [s.minute as f64, s.speed_kmh])
        .collect()
}

pub fn render_wind_chart(ui: &mut egui::Ui, samples: &[WindSample], theme: &Theme) {
    theme.card().show(ui, |ui| {
        ui.label(egui::RichText::new("Current Hourly Wind Cycle").strong().color(theme.accent));
        ui.label(egui::RichText::new("Wind speed (km/h), sampled every 5 min").color(theme.dim));
        ui.add_space(6.0);

        let line = Line::new("Wind speed", PlotPoints::from(wind_points(samples)))
            .color(theme.accent)
            .width(2.0);

        Plot::new("wind_cycle")
            .view_aspect(2.5)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("Minutes into cycle")
            .y_axis_label("km/h")
            .show(ui, |plot_ui| {
                plot_ui.line(line);
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_core::dto::wind_cycle;

    #[test]
    fn test_points_follow_cycle() {
        let points = wind_points(&wind_cycle());
        assert_eq!(points.len(), 12);
        assert_eq!(points[0], [0.0, 9.0]);
        assert_eq!(points[11], [55.0, 17.0]);
    }

    #[test]
    fn test_empty_cycle_has_no_points() {
        assert!(wind_points(&[]).is_empty());
    }
}
