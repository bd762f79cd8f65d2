use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use super::model::{MarketDataset, MarketRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Load failures halt data-dependent rendering; there is no retry and no
/// fallback source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: '{value}' is not a calendar date")]
    BadDate { row: usize, value: String },

    #[error("file contains no data rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// One raw CSV row. The column names are fixed literals the upstream export
/// writes; the loader fails on files that do not carry them.
#[derive(Debug, Deserialize)]
struct RawRow {
    data: String,
    preco_soja_brl: f64,
    dolar_ptax: f64,
    status_safra: String,
    var_soja_pct: f64,
    var_dolar_pct: f64,
}

/// Dates arrive either as plain ISO dates or with a time suffix
/// (`"2024-01-05 00:00:00"` from a datetime export).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw
        .split_once(|c: char| c == ' ' || c == 'T')
        .map(|(d, _)| d)
        .unwrap_or(raw);
    NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d").ok()
}

/// Parse the dashboard CSV into a sorted [`MarketDataset`].
pub fn load_csv(path: &Path) -> Result<MarketDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result?;
        let date = parse_date(&raw.data).ok_or_else(|| LoadError::BadDate {
            row: row_no,
            value: raw.data.clone(),
        })?;
        records.push(MarketRecord::new(
            date,
            raw.preco_soja_brl,
            raw.dolar_ptax,
            raw.status_safra,
            raw.var_soja_pct,
            raw.var_dolar_pct,
        ));
    }

    MarketDataset::from_records(records).ok_or(LoadError::Empty)
}

// ---------------------------------------------------------------------------
// Session cache
// ---------------------------------------------------------------------------

/// Process-wide memoized load: the dataset is read once per session and the
/// same `Arc` handed to every caller until the cache is invalidated (or a
/// different file is opened).
#[derive(Default)]
pub struct DatasetCache {
    slot: Mutex<Option<(PathBuf, Arc<MarketDataset>)>>,
}

impl DatasetCache {
    /// Return the cached dataset for `path`, loading it on first use.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<MarketDataset>, LoadError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((cached_path, dataset)) = slot.as_ref() {
            if cached_path == path {
                return Ok(Arc::clone(dataset));
            }
        }
        let dataset = Arc::new(load_csv(path)?);
        *slot = Some((path.to_path_buf(), Arc::clone(&dataset)));
        Ok(dataset)
    }

    /// Drop the cached dataset; the next `get_or_load` re-reads the file.
    pub fn invalidate(&self) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// The one cache instance for the process.
pub static SESSION: Lazy<DatasetCache> = Lazy::new(DatasetCache::default);

/// File the dashboard looks for on startup, next to the executable's working
/// directory. Matches the upstream export name.
pub const DEFAULT_DATA_FILE: &str = "soja_dashboard_final.csv";
