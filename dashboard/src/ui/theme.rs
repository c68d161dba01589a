//! # Dashboard Theme
//!
//! Dark palette with a wind-turbine teal accent.

use egui::{Color32, Context, Stroke, Visuals};

/// Colors used by the widgets.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Normal text color
    pub normal: Color32,
    /// Headings and highlighted values
    pub accent: Color32,
    /// Dimmed/secondary text
    pub dim: Color32,
    pub success: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub border: Color32,
    pub background: Color32,
    /// Card and panel fill
    pub panel: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            normal: Color32::from_rgb(235, 238, 240),
            accent: Color32::from_rgb(38, 198, 180),
            dim: Color32::from_rgb(140, 150, 158),
            success: Color32::from_rgb(76, 201, 110),
            error: Color32::from_rgb(235, 87, 87),
            warning: Color32::from_rgb(242, 180, 65),
            border: Color32::from_rgb(52, 60, 66),
            background: Color32::from_rgb(18, 22, 25),
            panel: Color32::from_rgb(27, 32, 36),
        }
    }
}

impl Theme {
    /// Install the palette on the egui context.
    pub fn apply(&self, ctx: &Context) {
        let mut visuals = Visuals::dark();
        visuals.override_text_color = Some(self.normal);
        visuals.panel_fill = self.background;
        visuals.window_fill = self.panel;
        visuals.extreme_bg_color = self.panel;
        visuals.hyperlink_color = self.accent;
        visuals.selection.bg_fill = self.accent.linear_multiply(0.4);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        ctx.set_visuals(visuals);
    }

    /// Frame used for the dashboard cards.
    pub fn card(&self) -> egui::Frame {
        egui::Frame::new()
            .fill(self.panel)
            .stroke(Stroke::new(1.0, self.border))
            .corner_radius(6.0)
            .inner_margin(12.0)
    }
}
