//! Lumaview demo application entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

use app::DemoApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Lumaview",
        opts,
        Box::new(|_cc| Ok(Box::new(DemoApp::default()))),
    )
}
