use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// MarketRecord – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single trading day: soybean price, PTAX rate and crop-cycle phase.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRecord {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Soybean price in BRL per 60 kg sack.
    pub price_brl: f64,
    /// End-of-day USD/BRL PTAX rate.
    pub fx_ptax: f64,
    /// Crop-cycle phase label, optionally dotted for ordering
    /// (e.g. `"2.Crescimento"`).
    pub phase: String,
    /// Day-over-day soybean price change, percent.
    pub price_pct: f64,
    /// Day-over-day PTAX change, percent.
    pub fx_pct: f64,
    /// Year extracted from `date`.
    pub year: i32,
    /// Month (1–12) extracted from `date`.
    pub month: u32,
}

impl MarketRecord {
    pub fn new(
        date: NaiveDate,
        price_brl: f64,
        fx_ptax: f64,
        phase: String,
        price_pct: f64,
        fx_pct: f64,
    ) -> Self {
        MarketRecord {
            year: date.year(),
            month: date.month(),
            date,
            price_brl,
            fx_ptax,
            phase,
            price_pct,
            fx_pct,
        }
    }

    /// Phase label for display, order prefix removed.
    pub fn phase_display(&self) -> &str {
        display_phase(&self.phase)
    }
}

/// Phase label for display: the part after the first `.` when the label is
/// dotted (`"2.Crescimento"` → `"Crescimento"`), otherwise the label itself.
pub fn display_phase(label: &str) -> &str {
    match label.split_once('.') {
        Some((_, rest)) => rest,
        None => label,
    }
}

// ---------------------------------------------------------------------------
// MarketDataset – the complete loaded series
// ---------------------------------------------------------------------------

/// The full parsed time series, sorted ascending by date and immutable after
/// load, with pre-computed filter indices.
#[derive(Debug, Clone)]
pub struct MarketDataset {
    /// All records, ordered by date.
    pub records: Vec<MarketRecord>,
    /// Sorted set of distinct phase labels.
    pub phases: BTreeSet<String>,
    /// Sorted set of distinct years.
    pub years: BTreeSet<i32>,
    /// Date of the first record.
    pub min_date: NaiveDate,
    /// Date of the last record.
    pub max_date: NaiveDate,
}

impl MarketDataset {
    /// Build the dataset from loaded records. Sorts by date and collects the
    /// unique phase/year indices. Returns `None` for an empty record list —
    /// the loader turns that into a `LoadError`.
    pub fn from_records(mut records: Vec<MarketRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        records.sort_by_key(|r| r.date);

        let phases: BTreeSet<String> = records.iter().map(|r| r.phase.clone()).collect();
        let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
        let min_date = records.first().map(|r| r.date)?;
        let max_date = records.last().map(|r| r.date)?;

        Some(MarketDataset {
            records,
            phases,
            years,
            min_date,
            max_date,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, price: f64, phase: &str) -> MarketRecord {
        MarketRecord::new(
            date.parse().unwrap(),
            price,
            5.0,
            phase.to_string(),
            0.0,
            0.0,
        )
    }

    #[test]
    fn from_records_sorts_and_indexes() {
        let ds = MarketDataset::from_records(vec![
            rec("2024-03-10", 152.0, "3.Colheita"),
            rec("2023-11-01", 148.0, "1.Plantio"),
            rec("2024-01-05", 150.0, "2.Crescimento"),
        ])
        .unwrap();

        assert_eq!(ds.records[0].date.to_string(), "2023-11-01");
        assert_eq!(ds.records[2].date.to_string(), "2024-03-10");
        assert_eq!(ds.min_date.to_string(), "2023-11-01");
        assert_eq!(ds.max_date.to_string(), "2024-03-10");
        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2023, 2024]);
        assert_eq!(ds.phases.len(), 3);
    }

    #[test]
    fn from_records_rejects_empty() {
        assert!(MarketDataset::from_records(Vec::new()).is_none());
    }

    #[test]
    fn derived_year_month() {
        let r = rec("2024-07-15", 140.0, "4.Entressafra");
        assert_eq!(r.year, 2024);
        assert_eq!(r.month, 7);
    }

    #[test]
    fn phase_display_strips_order_prefix() {
        assert_eq!(rec("2024-01-01", 1.0, "2.Crescimento").phase_display(), "Crescimento");
        assert_eq!(rec("2024-01-01", 1.0, "Colheita").phase_display(), "Colheita");
    }
}
