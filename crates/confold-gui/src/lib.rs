//! CONFOLD job submission window using eframe/egui

pub mod app;
pub mod async_bridge;
pub mod dialogs;
pub mod processor;
pub mod state;
pub mod ui_state;
pub mod widgets;

use anyhow::{Context, anyhow};
use confold_core::logging::{LoggingDestination, init_logging};

/// Main entry point for the GUI
pub fn run() -> anyhow::Result<()> {
    if let Err(e) = init_logging(LoggingDestination::FileOnly) {
        eprintln!("Warning: structured logging unavailable: {e}");
    }

    let async_bridge = async_bridge::AsyncBridge::new().context("failed to start async runtime")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 900.0])
            .with_min_inner_size([720.0, 600.0])
            .with_resizable(true)
            .with_title("CONFOLD"),
        ..Default::default()
    };

    eframe::run_native(
        "CONFOLD",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::ConfoldApp::new(cc, async_bridge)))),
    )
    .map_err(|e| anyhow!("{e}"))?;

    Ok(())
}
