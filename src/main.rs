mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::MonarchDashApp;
use eframe::egui;
use monarch_dash::config::DashboardConfig;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match DashboardConfig::discover() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration, using defaults: {e:#}");
            DashboardConfig::default()
        }
    };

    // A path on the command line wins over the configured one.
    let data_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.data_path.clone());

    let mut state = AppState::new(config);
    if let Some(path) = data_path {
        state.load_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Monarch Butterfly Sightings",
        options,
        Box::new(|_cc| Ok(Box::new(MonarchDashApp::new(state)))),
    )
}
