use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::format_skipped;
use crate::state::{AppState, StatusMessage, Tab};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }

            let has_report = state.report.is_some();
            if ui
                .add_enabled(has_report, egui::Button::new("Export plot (PNG)…"))
                .clicked()
            {
                if let Some(path) = save_file_dialog("Export plot", "output.png", "PNG", "png") {
                    state.request_png_export(path);
                }
                ui.close_menu();
            }
            if ui
                .add_enabled(has_report, egui::Button::new("Export skipped records (CSV)…"))
                .clicked()
            {
                if let Some(path) =
                    save_file_dialog("Export skipped records", "skipped.csv", "CSV", "csv")
                {
                    state.export_skip_report(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(source) = &state.source {
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(name);
            ui.separator();
        }

        match &state.status_message {
            Some(StatusMessage::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            Some(StatusMessage::Info(msg)) => {
                ui.label(msg);
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Optional logo, looked up relative to the working directory.
const LOGO_PATH: &str = "assets/logo.png";

pub fn header(ui: &mut Ui) {
    if Path::new(LOGO_PATH).exists() {
        ui.add(
            egui::Image::new(format!("file://{LOGO_PATH}"))
                .max_width(180.0)
                .max_height(60.0),
        );
    }
    ui.heading("Scatter Plotter");
    ui.label("Open a .csv with inputs, outputs and optional labels columns.");
    ui.separator();
}

// ---------------------------------------------------------------------------
// Metrics strip
// ---------------------------------------------------------------------------

/// Records / Plotted / Skipped counters.
pub fn metrics(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        return;
    };
    let cards = [
        ("Records", report.total_records),
        ("Plotted", report.accepted_count()),
        ("Skipped", report.rejected_count()),
    ];
    ui.columns(cards.len(), |columns| {
        for (ui, (title, value)) in columns.iter_mut().zip(cards) {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.label(RichText::new(title).small().weak());
                    ui.label(RichText::new(value.to_string()).size(24.0).strong());
                });
            });
        }
    });
}

/// Tab selector between the plot and the skipped-record details.
pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.active_tab, Tab::Plot, "📊 Plot");
        ui.selectable_value(&mut state.active_tab, Tab::Details, "🧾 Details");
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Details tab
// ---------------------------------------------------------------------------

pub fn details(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        ui.label("No file loaded.");
        return;
    };

    ui.heading("Skipped records");
    if report.skipped.is_empty() {
        ui.label("No records skipped.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for skipped in &report.skipped {
                ui.label(format!("• {}", format_skipped(skipped)));
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

fn save_file_dialog(title: &str, default_name: &str, kind: &str, ext: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .set_file_name(default_name)
        .add_filter(kind, &[ext])
        .save_file()
}
