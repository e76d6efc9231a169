mod app;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::ScatterCheckApp;
use clap::Parser;
use eframe::egui;

#[derive(Parser, Debug)]
#[command(
    name = "scatter-check",
    version,
    about = "Validate a table of inputs/outputs and plot the usable records"
)]
struct Args {
    /// CSV, JSON or Parquet file to open at startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Scatter Check",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ScatterCheckApp::new(args.file)))
        }),
    )
}
