#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Result;
use eframe::egui;
use flip_reader::ReaderOptions;

mod app;
mod logger;
mod views;
mod worker;

fn main() -> Result<()> {
    let app_logger = logger::AppLogger::new(200);
    app_logger.clone().init()?;

    let options = ReaderOptions::default();
    options.validate()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let tokio_handle = runtime.handle().clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("Flipbook"),
        ..Default::default()
    };

    eframe::run_native(
        "Flipbook",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(app::FlipbookApp::new(
                cc,
                tokio_handle,
                options,
                app_logger,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))
}
