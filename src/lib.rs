//! Monarch butterfly sightings: loading, filtering, aggregation and
//! declarative chart descriptions.
//!
//! The library has no GUI dependency; the `monarch-dash` binary renders
//! its output.
//!
//! ```text
//! load_file → filter_sightings → top_towns / daily_counts → ChartSpec
//! ```

pub mod chart;
pub mod config;
pub mod data;

pub use chart::{ChartKind, ChartSpec, PanelGrid, Series, XValues};
pub use data::aggregate::{daily_counts, top_towns, SummaryStats};
pub use data::filter::{filter_sightings, FilterState};
pub use data::loader::{load_csv_reader, load_file, LoadError};
pub use data::model::{FieldValue, Sighting, SightingCollection};
