use std::path::PathBuf;

use eframe::egui;

use crate::state::{AppState, StatusMessage, Tab};
use crate::ui::{panels, plot, snapshot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ScatterCheckApp {
    pub state: AppState,
    /// Where the plot was drawn last frame, for cropping exports.
    plot_rect: Option<egui::Rect>,
}

impl ScatterCheckApp {
    pub fn new(initial_file: Option<PathBuf>) -> Self {
        let mut app = Self::default();
        if let Some(path) = initial_file {
            app.state.load_path(&path);
        }
        app
    }

    /// Write a pending PNG export once the screenshot has arrived.
    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = screenshot else {
            return;
        };
        let Some(path) = self.state.pending_png.take() else {
            return;
        };

        let result = snapshot::save_png(&image, self.plot_rect, ctx.pixels_per_point(), &path);
        self.state.status_message = Some(match result {
            Ok(()) => StatusMessage::Info(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to export plot: {e:#}");
                StatusMessage::Error(format!("Error: {e:#}"))
            }
        });
    }
}

impl eframe::App for ScatterCheckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshot(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Summary counters ----
        if self.state.report.is_some() {
            egui::TopBottomPanel::top("metrics").show(ctx, |ui| {
                ui.add_space(4.0);
                panels::metrics(ui, &self.state);
                ui.add_space(4.0);
            });
        }

        // ---- Central panel: plot / details ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::header(ui);
            if self.state.report.is_some() {
                panels::tab_bar(ui, &mut self.state);
            }
            match self.state.active_tab {
                Tab::Plot => self.plot_rect = plot::scatter_plot(ui, &self.state),
                Tab::Details => panels::details(ui, &self.state),
            }
        });

        if self.state.take_screenshot_request() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
        }
    }
}
