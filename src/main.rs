mod app;
mod color;
mod config;
mod data;
mod glossary;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};
use app::OcrDashboardApp;
use config::{DashboardConfig, CONFIG_FILE};
use data::dataset::DashboardData;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;

    // All four tables must load before any window opens.
    let data = DashboardData::load(&config)
        .inspect_err(|e| log::error!("Failed to load dashboard data: {e}"))
        .with_context(|| format!("loading dashboard data from {}", config.data_dir.display()))?;
    let state = AppState::new(config, data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Official Cash Rate Prediction",
        options,
        Box::new(move |_cc| Ok(Box::new(OcrDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
