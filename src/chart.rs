//! Declarative chart descriptions.
//!
//! Builders here turn filtered sightings or aggregation results into a
//! [`ChartSpec`]: title, axis labels and data series.  They do no I/O and know
//! nothing about the GUI; the front end decides how to draw them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::aggregate::{
    daily_counts, monthly_counts, region_series, top_regions_by_individuals,
};
use crate::data::model::SightingCollection;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const SIGHTINGS_AXIS: &str = "Number of Sightings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
}

/// X coordinates of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum XValues {
    Dates(Vec<NaiveDate>),
    Categories(Vec<String>),
    Numbers(Vec<f64>),
}

impl XValues {
    pub fn len(&self) -> usize {
        match self {
            XValues::Dates(v) => v.len(),
            XValues::Categories(v) => v.len(),
            XValues::Numbers(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One data series; `x` and `y` (and `sizes`, when present) have equal length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub x: XValues,
    pub y: Vec<f64>,
    /// Per-point marker weight, for scatter charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Rotation of x tick labels in degrees; negative tilts them
    /// counter-clockwise.
    pub x_tick_angle: f32,
    pub series: Vec<Series>,
}

impl ChartSpec {
    fn new(kind: ChartKind, title: &str, x_label: &str, y_label: &str) -> Self {
        ChartSpec {
            kind,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x_tick_angle: 0.0,
            series: Vec::new(),
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.y.is_empty())
    }
}

/// Several small charts laid out on a grid, row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelGrid {
    pub title: String,
    pub columns: usize,
    pub panels: Vec<ChartSpec>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Daily sighting counts as a line chart.
pub fn sightings_over_time(records: &SightingCollection) -> ChartSpec {
    let (dates, counts): (Vec<NaiveDate>, Vec<f64>) = daily_counts(records)
        .into_iter()
        .map(|(d, c)| (d, c as f64))
        .unzip();

    let mut spec = ChartSpec::new(
        ChartKind::Line,
        "Monarch Butterfly Sightings Over Time",
        "Date",
        SIGHTINGS_AXIS,
    );
    spec.series.push(Series {
        name: "Sightings".to_string(),
        x: XValues::Dates(dates),
        y: counts,
        sizes: None,
    });
    spec
}

/// Bar chart of an already ranked `(town, count)` list, labels tilted 45°.
pub fn top_towns_bar(top: &[(String, usize)]) -> ChartSpec {
    let mut spec = ChartSpec::new(
        ChartKind::Bar,
        "Top 10 Towns with Most Sightings",
        "Town",
        SIGHTINGS_AXIS,
    );
    spec.x_tick_angle = -45.0;
    spec.series.push(Series {
        name: "Sightings".to_string(),
        x: XValues::Categories(top.iter().map(|(town, _)| town.clone()).collect()),
        y: top.iter().map(|(_, count)| *count as f64).collect(),
        sizes: None,
    });
    spec
}

/// Sightings per month across all years.
pub fn seasonal_bar(records: &SightingCollection) -> ChartSpec {
    let mut spec = ChartSpec::new(
        ChartKind::Bar,
        "Seasonal Pattern of Monarch Butterfly Sightings",
        "Month",
        SIGHTINGS_AXIS,
    );
    let months = monthly_counts(records);
    spec.series.push(Series {
        name: "Sightings".to_string(),
        x: XValues::Categories(MONTH_LABELS.iter().map(|m| m.to_string()).collect()),
        y: months.iter().map(|&c| c as f64).collect(),
        sizes: None,
    });
    spec
}

/// Sightings positioned by longitude/latitude, sized by individuals.
/// Sightings missing either coordinate are left out.
pub fn geographic_scatter(records: &SightingCollection) -> ChartSpec {
    let mut lon = Vec::new();
    let mut lat = Vec::new();
    let mut sizes = Vec::new();
    for s in records {
        if let Some((la, lo)) = s.coordinates() {
            lat.push(la);
            lon.push(lo);
            sizes.push(s.individuals());
        }
    }

    let mut spec = ChartSpec::new(
        ChartKind::Scatter,
        "Geographical Distribution of Monarch Butterfly Sightings",
        "Longitude",
        "Latitude",
    );
    spec.series.push(Series {
        name: "Sightings".to_string(),
        x: XValues::Numbers(lon),
        y: lat,
        sizes: Some(sizes),
    });
    spec
}

/// One line panel per region for the `n` regions with the most individuals,
/// five panels per row.
pub fn region_panels(records: &SightingCollection, n: usize) -> PanelGrid {
    let panels: Vec<ChartSpec> = top_regions_by_individuals(records, n)
        .into_iter()
        .map(|(region, _)| {
            let (dates, totals): (Vec<NaiveDate>, Vec<f64>) =
                region_series(records, &region).into_iter().unzip();
            let mut spec = ChartSpec::new(
                ChartKind::Line,
                &format!("{region} Monarch Butterfly Sightings"),
                "Year",
                "Count",
            );
            spec.series.push(Series {
                name: region,
                x: XValues::Dates(dates),
                y: totals,
                sizes: None,
            });
            spec
        })
        .collect();

    PanelGrid {
        title: format!(
            "Top {} States and Monarch Population Sightings",
            panels.len()
        ),
        columns: 5,
        panels,
    }
}
