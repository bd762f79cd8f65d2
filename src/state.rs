use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::PhasePalette;
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::loader::{LoadError, SESSION};
use crate::data::model::MarketDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which central tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Market,
    Seasonal,
    Data,
}

/// The full UI state, independent of rendering. The dataset is immutable and
/// shared; everything derived from the filters is recomputed per interaction.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Arc<MarketDataset>>,

    /// Current filter selection.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current filters (cached).
    pub visible: Vec<usize>,

    /// Phase → colour mapping for the sidebar and seasonal plots.
    pub phase_colors: Option<PhasePalette>,

    /// Active central tab.
    pub tab: Tab,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        // Placeholder range; replaced by the dataset bounds on load.
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        Self {
            dataset: None,
            criteria: FilterCriteria {
                start: epoch,
                end: epoch,
                phases: BTreeSet::new(),
                years: BTreeSet::new(),
            },
            visible: Vec::new(),
            phase_colors: None,
            tab: Tab::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: reset filters to select-all and build
    /// the phase palette.
    pub fn set_dataset(&mut self, dataset: Arc<MarketDataset>) {
        self.criteria = FilterCriteria::select_all(&dataset);
        self.visible = (0..dataset.len()).collect();
        self.phase_colors = Some(PhasePalette::new(&dataset.phases));
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load a file through the session cache and install it on success.
    pub fn load_path(&mut self, path: &Path) {
        match SESSION.get_or_load(path) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} records ({} – {})",
                    dataset.len(),
                    dataset.min_date,
                    dataset.max_date
                );
                self.set_dataset(dataset);
            }
            Err(e) => self.set_load_error(&e),
        }
    }

    pub fn set_load_error(&mut self, error: &LoadError) {
        log::error!("failed to load dataset: {error}");
        self.status_message = Some(format!("Error: {error}"));
    }

    /// Recompute `visible` after any filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible = filtered_indices(ds, &self.criteria);
        }
    }

    /// Clamp the date range to the dataset bounds and keep start <= end.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        if let Some(ds) = &self.dataset {
            self.criteria.start = start.clamp(ds.min_date, ds.max_date);
            self.criteria.end = end.clamp(ds.min_date, ds.max_date);
            if self.criteria.start > self.criteria.end {
                std::mem::swap(&mut self.criteria.start, &mut self.criteria.end);
            }
        }
        self.refilter();
    }

    /// Toggle one phase in the multiselect.
    pub fn toggle_phase(&mut self, phase: &str) {
        if !self.criteria.phases.remove(phase) {
            self.criteria.phases.insert(phase.to_string());
        }
        self.refilter();
    }

    /// Toggle one fiscal year in the multiselect.
    pub fn toggle_year(&mut self, year: i32) {
        if !self.criteria.years.remove(&year) {
            self.criteria.years.insert(year);
        }
        self.refilter();
    }

    pub fn select_all_phases(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria.phases = ds.phases.clone();
        }
        self.refilter();
    }

    pub fn select_no_phases(&mut self) {
        self.criteria.phases.clear();
        self.refilter();
    }

    pub fn select_all_years(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria.years = ds.years.clone();
        }
        self.refilter();
    }

    pub fn select_no_years(&mut self) {
        self.criteria.years.clear();
        self.refilter();
    }
}
