mod app;
mod color;
mod ui;

use app::PolyscatterApp;
use eframe::egui;
use polyscatter::config::ViewerConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Polyscatter – Region & Polygon Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(PolyscatterApp::new(config)))),
    )
}
