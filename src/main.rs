use boardview_background::app::ViewerApp;
use boardview_background::logging;
use boardview_background::settings::Settings;

use eframe::egui;
use std::path::PathBuf;

const SETTINGS_PATH: &str = "settings.json";

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_PATH)?;
    logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));

    let board = std::env::args_os().nth(1).map(PathBuf::from);
    if let Some(b) = &board {
        tracing::info!("opening board {}", b.display());
    }

    let (w, h) = settings.window_size.unwrap_or((1024, 768));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([w as f32, h as f32])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Boardview",
        native_options,
        Box::new(move |_cc| Box::new(ViewerApp::new(settings, board))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
