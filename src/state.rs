use std::path::Path;

use chrono::NaiveDate;
use monarch_dash::chart::{
    geographic_scatter, region_panels, seasonal_bar, sightings_over_time, top_towns_bar,
    ChartSpec, PanelGrid,
};
use monarch_dash::config::DashboardConfig;
use monarch_dash::data::aggregate::{top_towns, SummaryStats};
use monarch_dash::data::filter::FilterState;
use monarch_dash::data::loader::load_file;
use monarch_dash::data::model::SightingCollection;

use crate::color::ColorMap;
use crate::ui::gallery::Gallery;
use crate::ui::plot::ChartTab;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which page the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Charts,
    Table,
    Gallery,
}

/// Chart specs derived from the current filtered sightings.
pub struct Charts {
    pub over_time: ChartSpec,
    pub top_towns: ChartSpec,
    pub seasonal: ChartSpec,
    pub geographic: ChartSpec,
    pub regions: PanelGrid,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<SightingCollection>,

    /// File name of the loaded dataset, for the top bar.
    pub source_name: Option<String>,

    /// Date range and region selection; None while no dataset is loaded
    /// or the dataset is empty.
    pub filters: Option<FilterState>,

    /// Sightings passing the current filters (cached).
    pub filtered: SightingCollection,

    pub summary: SummaryStats,
    pub charts: Option<Charts>,
    pub color_map: Option<ColorMap>,
    pub view: View,
    pub chart_tab: ChartTab,
    pub gallery: Gallery,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let gallery = Gallery::new(&config.assets_dir);
        Self {
            config,
            dataset: None,
            source_name: None,
            filters: None,
            filtered: SightingCollection::default(),
            summary: SummaryStats::default(),
            charts: None,
            color_map: None,
            view: View::default(),
            chart_tab: ChartTab::default(),
            gallery,
            status_message: None,
        }
    }

    /// Load a sightings file, reporting failure in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                self.source_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: SightingCollection) {
        self.filters = FilterState::for_collection(&dataset);
        self.color_map = Some(ColorMap::new(&dataset.regions()));
        if dataset.is_empty() {
            log::warn!("Loaded dataset has no sightings");
        }
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered sightings, summary and charts after any
    /// filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.filtered = match &self.filters {
            Some(filters) => filters.apply(ds),
            None => ds.with_sightings(Vec::new()),
        };
        self.summary = SummaryStats::compute(&self.filtered);
        self.charts = Some(Charts {
            over_time: sightings_over_time(&self.filtered),
            top_towns: top_towns_bar(&top_towns(&self.filtered, self.config.top_n)),
            seasonal: seasonal_bar(&self.filtered),
            geographic: geographic_scatter(&self.filtered),
            regions: region_panels(&self.filtered, self.config.panel_count),
        });
        log::debug!(
            "Filter applied: {} of {} sightings visible",
            self.filtered.len(),
            ds.len()
        );
    }

    /// Replace the date bounds; an inverted range is allowed and shows nothing.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        if let Some(filters) = &mut self.filters {
            filters.start = start;
            filters.end = end;
            self.refilter();
        }
    }

    /// Toggle a single region in the filter.
    pub fn toggle_region(&mut self, region: &str) {
        if let Some(filters) = &mut self.filters {
            if !filters.regions.remove(region) {
                filters.regions.insert(region.to_string());
            }
            self.refilter();
        }
    }

    /// Select every region.
    pub fn select_all_regions(&mut self) {
        if let (Some(ds), Some(filters)) = (&self.dataset, &mut self.filters) {
            filters.regions = ds.regions();
            self.refilter();
        }
    }

    /// Deselect all regions.
    pub fn select_no_regions(&mut self) {
        if let Some(filters) = &mut self.filters {
            filters.regions.clear();
            self.refilter();
        }
    }
}
