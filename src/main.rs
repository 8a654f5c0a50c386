// Application entry point for the Hardware Monitor GUI

// Metric collectors for CPU, RAM, GPU and system identity
mod collectors;
// Built-in application settings
mod config;
// Import the GUI module containing the main application state
mod gui;
// Data models for table rows and snapshots
mod models;

use tracing_subscriber::EnvFilter;

/// Entry point for the application.
/// Initializes logging, then launches the eframe window.
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::AppConfig::default();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        interval = ?config.refresh_interval,
        "starting hardware monitor"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.min_window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(gui::AppState::new(cc, &config)))),
    )
}
