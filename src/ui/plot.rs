use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};
use monarch_dash::chart::{ChartKind, ChartSpec, PanelGrid, Series, XValues};

use crate::color::ColorMap;
use crate::state::AppState;

const DEFAULT_COLOR: Color32 = Color32::from_rgb(230, 126, 34);

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

fn date_to_x(d: NaiveDate) -> f64 {
    d.num_days_from_ce() as f64
}

fn x_to_date_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn x_values(x: &XValues) -> Vec<f64> {
    match x {
        XValues::Dates(dates) => dates.iter().copied().map(date_to_x).collect(),
        XValues::Categories(labels) => (0..labels.len()).map(|i| i as f64).collect(),
        XValues::Numbers(values) => values.clone(),
    }
}

/// Marker radius for a scatter point weighted by individuals.
fn marker_radius(size: f64) -> f32 {
    (2.0 + size.max(1.0).log10() * 2.5).min(9.0) as f32
}

// ---------------------------------------------------------------------------
// ChartSpec rendering
// ---------------------------------------------------------------------------

/// Render one chart spec, filling the available space or `height` if given.
pub fn chart(ui: &mut Ui, id: &str, spec: &ChartSpec, color: Color32, height: Option<f32>) {
    if spec.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No sightings match the current filters.");
        });
        return;
    }

    let categories: Vec<String> = spec
        .series
        .iter()
        .find_map(|s| match &s.x {
            XValues::Categories(labels) => Some(labels.clone()),
            _ => None,
        })
        .unwrap_or_default();
    let has_dates = spec
        .series
        .iter()
        .any(|s| matches!(s.x, XValues::Dates(_)));

    let mut plot = Plot::new(id)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if let Some(h) = height {
        plot = plot.height(h);
    }
    if spec.series.len() > 1 {
        plot = plot.legend(Legend::default());
    }
    if has_dates {
        plot = plot.x_axis_formatter(x_to_date_label);
    } else if !categories.is_empty() {
        plot = plot.x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let i = mark.value.round();
            if (mark.value - i).abs() > f64::EPSILON || i < 0.0 {
                return String::new();
            }
            categories.get(i as usize).cloned().unwrap_or_default()
        });
    }

    plot.show(ui, |plot_ui| {
        for series in &spec.series {
            match spec.kind {
                ChartKind::Line => plot_ui.line(line(series, color)),
                ChartKind::Bar => plot_ui.bar_chart(bars(series, color)),
                ChartKind::Scatter => {
                    for p in points(series, color) {
                        plot_ui.points(p);
                    }
                }
            }
        }
    });
}

fn line(series: &Series, color: Color32) -> Line {
    let points: PlotPoints = x_values(&series.x)
        .into_iter()
        .zip(series.y.iter())
        .map(|(x, &y)| [x, y])
        .collect();
    Line::new(points).name(&series.name).color(color).width(1.5)
}

fn bars(series: &Series, color: Color32) -> BarChart {
    let labels: Vec<String> = match &series.x {
        XValues::Categories(labels) => labels.clone(),
        _ => Vec::new(),
    };
    let bars = x_values(&series.x)
        .into_iter()
        .zip(series.y.iter())
        .enumerate()
        .map(|(i, (x, &y))| {
            let bar = Bar::new(x, y).width(0.7);
            match labels.get(i) {
                Some(label) => bar.name(label),
                None => bar,
            }
        })
        .collect();
    BarChart::new(bars).name(&series.name).color(color)
}

/// Scatter points grouped by marker radius; egui_plot sizes whole series.
fn points(series: &Series, color: Color32) -> Vec<Points> {
    let xs = x_values(&series.x);
    let mut groups: Vec<(f32, Vec<[f64; 2]>)> = Vec::new();
    for (i, (x, &y)) in xs.into_iter().zip(series.y.iter()).enumerate() {
        let size = series
            .sizes
            .as_ref()
            .and_then(|s| s.get(i).copied())
            .unwrap_or(1.0);
        let radius = (marker_radius(size) * 2.0).round() / 2.0;
        match groups.iter_mut().find(|(r, _)| *r == radius) {
            Some((_, pts)) => pts.push([x, y]),
            None => groups.push((radius, vec![[x, y]])),
        }
    }
    groups
        .into_iter()
        .map(|(radius, pts)| {
            Points::new(PlotPoints::from(pts))
                .radius(radius)
                .color(color.gamma_multiply(0.7))
                .name(&series.name)
        })
        .collect()
}

/// Render a panel grid, each region drawn in its own colour.
pub fn panel_grid(ui: &mut Ui, grid: &PanelGrid, colors: Option<&ColorMap>) {
    if grid.panels.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No sightings match the current filters.");
        });
        return;
    }

    ui.heading(&grid.title);
    let columns = grid.columns.max(1);
    let spacing = ui.spacing().item_spacing.x;
    let cell_width = (ui.available_width() - spacing * columns as f32) / columns as f32;

    egui::ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        egui::Grid::new("region_panels")
            .num_columns(columns)
            .show(ui, |ui: &mut Ui| {
                for (i, panel) in grid.panels.iter().enumerate() {
                    let color = panel
                        .series
                        .first()
                        .and_then(|s| colors.map(|c| c.color_for(&s.name)))
                        .unwrap_or(DEFAULT_COLOR);
                    ui.vertical(|ui: &mut Ui| {
                        ui.set_width(cell_width);
                        ui.label(&panel.title);
                        chart(ui, &format!("region_panel_{i}"), panel, color, Some(180.0));
                    });
                    if (i + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });
    });
}

/// Render the chart page: one tab per chart.
pub fn chart_page(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for t in ChartTab::ALL {
            ui.selectable_value(&mut state.chart_tab, t, t.label());
        }
    });
    ui.separator();

    let Some(charts) = &state.charts else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view sightings  (File → Open…)");
        });
        return;
    };

    let tab = state.chart_tab;
    let spec = match tab {
        ChartTab::OverTime => &charts.over_time,
        ChartTab::TopTowns => &charts.top_towns,
        ChartTab::Seasonal => &charts.seasonal,
        ChartTab::Map => &charts.geographic,
        ChartTab::Regions => {
            panel_grid(ui, &charts.regions, state.color_map.as_ref());
            return;
        }
    };
    ui.heading(&spec.title);
    chart(ui, tab.label(), spec, DEFAULT_COLOR, None);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTab {
    #[default]
    OverTime,
    TopTowns,
    Seasonal,
    Map,
    Regions,
}

impl ChartTab {
    const ALL: [ChartTab; 5] = [
        ChartTab::OverTime,
        ChartTab::TopTowns,
        ChartTab::Seasonal,
        ChartTab::Map,
        ChartTab::Regions,
    ];

    fn label(self) -> &'static str {
        match self {
            ChartTab::OverTime => "Over time",
            ChartTab::TopTowns => "Top towns",
            ChartTab::Seasonal => "Seasonal",
            ChartTab::Map => "Map",
            ChartTab::Regions => "By state",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_axis_round_trips() {
        let d = NaiveDate::from_ymd_opt(2023, 4, 12).unwrap();
        let mark = GridMark {
            value: date_to_x(d),
            step_size: 1.0,
        };
        assert_eq!(x_to_date_label(mark, &(0.0..=1.0)), "2023-04-12");
    }

    #[test]
    fn marker_radius_grows_and_caps() {
        assert_eq!(marker_radius(1.0), 2.0);
        assert!(marker_radius(100.0) > marker_radius(10.0));
        assert_eq!(marker_radius(1e12), 9.0);
    }
}
