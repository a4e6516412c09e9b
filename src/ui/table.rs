use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use monarch_dash::data::loader::display_cell;

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Raw table of the filtered sightings, one column per source column.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view sightings  (File → Open…)");
        });
        return;
    };
    let columns = &dataset.column_names;
    let rows = &state.filtered.sightings;

    if rows.is_empty() {
        ui.label("No sightings match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0).clip(true), columns.len())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for col in columns {
                header.col(|ui: &mut Ui| {
                    ui.label(RichText::new(col).strong());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let sighting = &rows[row.index()];
                for col in columns {
                    row.col(|ui: &mut Ui| {
                        ui.label(display_cell(sighting, col));
                    });
                }
            });
        });
}
