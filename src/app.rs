use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{gallery, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MonarchDashApp {
    pub state: AppState,
}

impl MonarchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MonarchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        if self.state.view != View::Gallery {
            egui::SidePanel::left("filter_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: charts, raw data or gallery ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Charts => plot::chart_page(ui, &mut self.state),
            View::Table => table::data_table(ui, &self.state),
            View::Gallery => gallery::gallery_page(ui, &mut self.state.gallery),
        });
    }
}
