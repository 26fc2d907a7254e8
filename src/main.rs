//! UI Kata - Main Entry Point
//!
//! A desktop practice tool: pick an exercise, edit its component in a small
//! typed markup dialect, and watch the live preview recompile on every
//! pause in typing.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uikata::frontend::KataApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,uikata=trace")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting UI Kata");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("UI Kata"),
        ..Default::default()
    };

    eframe::run_native(
        "UI Kata",
        native_options,
        Box::new(|cc| Ok(Box::new(KataApp::new(cc)))),
    )
}
