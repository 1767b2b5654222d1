// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Git Scenarios: a desktop reference for everyday Git workflows.

mod app;
mod clipboard;
mod config;
mod content;
mod error;
mod markdown;
mod state;
mod theme;
mod ui;

use app::{GitScenariosApp, APP_NAME};
use config::WindowSize;
use eframe::egui::ViewportBuilder;
use log::info;

const MIN_WINDOW: [f32; 2] = [640.0, 400.0];

fn viewport(size: &WindowSize) -> ViewportBuilder {
    ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([size.width, size.height])
        .with_min_inner_size(MIN_WINDOW)
        .with_maximized(size.maximized)
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = config::load_config();
    info!(
        "Starting {} v{} ({}x{})",
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        settings.window_size.width,
        settings.window_size.height
    );

    let options = eframe::NativeOptions {
        viewport: viewport(&settings.window_size),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(GitScenariosApp::new(cc, settings)))),
    )
}
