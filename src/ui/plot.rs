use eframe::egui::{Color32, Rect, Ui};
use egui_plot::{Plot, PlotPoints, Points};

use crate::data::schema::{INPUTS_COLUMN, OUTPUTS_COLUMN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter plot (Plot tab)
// ---------------------------------------------------------------------------

/// Render the scatter of accepted records.
///
/// Returns the screen rect of the plot so it can be cropped for export.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) -> Option<Rect> {
    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to plot it  (File → Open…)");
        });
        return None;
    };

    ui.heading(format!(
        "Scatter Plot of {INPUTS_COLUMN} vs {OUTPUTS_COLUMN}"
    ));

    let points: PlotPoints = report.accepted.iter().map(|&(x, y)| [x, y]).collect();

    let response = Plot::new("scatter_plot")
        .x_axis_label(INPUTS_COLUMN)
        .y_axis_label(OUTPUTS_COLUMN)
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("plotted records")
                    .color(Color32::LIGHT_BLUE)
                    .radius(3.0),
            );
        });

    Some(response.response.rect)
}
