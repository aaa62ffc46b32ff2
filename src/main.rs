mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use app::SpectralAnalysisApp;
use eframe::egui;
use spectral_analysis::config::{Settings, SETTINGS_FILE};

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Spectral Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(SpectralAnalysisApp::new(settings)))),
    )
}
