use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let Some(filters) = &state.filters else {
        ui.label("The dataset has no sightings.");
        return;
    };

    // Clone what we need so we can mutate state below.
    let all_regions = dataset.regions();
    let (mut start, mut end) = (filters.start, filters.end);
    let selected = filters.regions.clone();

    // ---- Date range ----
    ui.strong("Date range");
    let mut dates_changed = false;
    egui::Grid::new("date_range")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("From");
            dates_changed |= ui
                .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                .changed();
            ui.end_row();
            ui.label("To");
            dates_changed |= ui
                .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                .changed();
            ui.end_row();
        });
    if dates_changed {
        state.set_date_range(start, end);
    }
    if start > end {
        ui.label(RichText::new("Start date is after end date.").color(Color32::YELLOW));
    }
    ui.separator();

    // ---- Summary ----
    summary(ui, state);
    ui.separator();

    // ---- Region filter ----
    let header_text = format!(
        "State/Province  ({}/{})",
        selected.len(),
        all_regions.len()
    );
    ui.strong(header_text);
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_regions();
        }
        if ui.small_button("None").clicked() {
            state.select_no_regions();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for region in &all_regions {
                let label = if region.is_empty() {
                    "<blank>"
                } else {
                    region.as_str()
                };
                let mut text = RichText::new(label);
                if let Some(cm) = &state.color_map {
                    text = text.color(cm.color_for(region));
                }

                let mut checked = selected.contains(region);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_region(region);
                }
            }
        });
}

fn summary(ui: &mut Ui, state: &AppState) {
    let s = &state.summary;
    egui::Grid::new("summary")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Sightings");
            ui.label(s.sightings.to_string());
            ui.end_row();
            ui.label("Individuals");
            ui.label(format!("{:.0}", s.individuals));
            ui.end_row();
            ui.label("Towns");
            ui.label(s.towns.to_string());
            ui.end_row();
            ui.label("States/Provinces");
            ui.label(s.regions.to_string());
            ui.end_row();
            ui.label("With coordinates");
            ui.label(s.with_coordinates.to_string());
            ui.end_row();
            if let (Some(first), Some(last)) = (s.first_date, s.last_date) {
                ui.label("Observed");
                ui.label(format!("{first} – {last}"));
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.view, View::Charts, "Charts");
        ui.selectable_value(&mut state.view, View::Table, "Data");
        ui.selectable_value(&mut state.view, View::Gallery, "Gallery");

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{}: {} sightings loaded, {} visible",
                state.source_name.as_deref().unwrap_or("dataset"),
                ds.len(),
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sightings data")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
