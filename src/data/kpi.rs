use chrono::NaiveDate;

use super::model::MarketDataset;

// ---------------------------------------------------------------------------
// Headline metrics over the filtered view
// ---------------------------------------------------------------------------

/// Scalar KPIs shown in the metric strip. All values come from the *filtered*
/// view so the cards track the user's current selection, not the raw file.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSummary {
    /// Date of the last record in the view.
    pub latest_date: NaiveDate,
    /// Soybean price of the last record.
    pub latest_price: f64,
    /// Price change versus the previous record in the view.
    pub price_delta: f64,
    /// PTAX of the last record.
    pub latest_fx: f64,
    /// PTAX change versus the previous record in the view.
    pub fx_delta: f64,
    /// Arithmetic mean price over the whole view.
    pub mean_price: f64,
    /// Phase label of the last record, with any dotted order prefix removed.
    pub current_phase: String,
    /// Number of records in the view.
    pub record_count: usize,
}

/// Summarize the view given as ordered record indices into `dataset`.
///
/// Returns `None` for an empty view — callers must short-circuit rendering
/// and invite the user to broaden the filters. A single-record view uses the
/// record as its own predecessor, so both deltas are zero.
pub fn summarize(dataset: &MarketDataset, view: &[usize]) -> Option<KpiSummary> {
    let &last = view.last()?;
    let latest = &dataset.records[last];
    let previous = view
        .len()
        .checked_sub(2)
        .map(|i| &dataset.records[view[i]])
        .unwrap_or(latest);

    let sum: f64 = view.iter().map(|&i| dataset.records[i].price_brl).sum();

    Some(KpiSummary {
        latest_date: latest.date,
        latest_price: latest.price_brl,
        price_delta: latest.price_brl - previous.price_brl,
        latest_fx: latest.fx_ptax,
        fx_delta: latest.fx_ptax - previous.fx_ptax,
        mean_price: sum / view.len() as f64,
        current_phase: latest.phase_display().to_string(),
        record_count: view.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MarketRecord;

    fn dataset(rows: &[(&str, f64, f64)]) -> MarketDataset {
        MarketDataset::from_records(
            rows.iter()
                .map(|(d, price, fx)| {
                    MarketRecord::new(
                        d.parse().unwrap(),
                        *price,
                        *fx,
                        "2.Crescimento".to_string(),
                        0.0,
                        0.0,
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_view_short_circuits() {
        let ds = dataset(&[("2024-01-01", 150.0, 5.0)]);
        assert!(summarize(&ds, &[]).is_none());
    }

    #[test]
    fn single_record_view_has_zero_deltas() {
        let ds = dataset(&[("2024-01-01", 150.0, 5.0)]);
        let kpi = summarize(&ds, &[0]).unwrap();
        assert_eq!(kpi.price_delta, 0.0);
        assert_eq!(kpi.fx_delta, 0.0);
        assert_eq!(kpi.mean_price, 150.0);
        assert_eq!(kpi.record_count, 1);
    }

    #[test]
    fn two_record_example() {
        // The worked example: deltas come from the last two rows, the mean
        // spans the whole view.
        let ds = dataset(&[("2024-01-01", 150.0, 5.0), ("2024-01-02", 152.0, 5.1)]);
        let kpi = summarize(&ds, &[0, 1]).unwrap();
        assert_eq!(kpi.latest_price, 152.0);
        assert_eq!(kpi.price_delta, 2.0);
        assert!((kpi.fx_delta - 0.1).abs() < 1e-12);
        assert_eq!(kpi.mean_price, 151.0);
        assert_eq!(kpi.latest_date.to_string(), "2024-01-02");
    }

    #[test]
    fn mean_of_identical_prices_is_that_price() {
        let ds = dataset(&[
            ("2024-01-01", 140.0, 5.0),
            ("2024-01-02", 140.0, 5.1),
            ("2024-01-03", 140.0, 5.2),
        ]);
        let kpi = summarize(&ds, &[0, 1, 2]).unwrap();
        assert_eq!(kpi.mean_price, 140.0);
    }

    #[test]
    fn kpis_follow_the_view_not_the_dataset() {
        let ds = dataset(&[
            ("2024-01-01", 100.0, 5.0),
            ("2024-01-02", 150.0, 5.1),
            ("2024-01-03", 999.0, 9.9),
        ]);
        // View excludes the last raw record.
        let kpi = summarize(&ds, &[0, 1]).unwrap();
        assert_eq!(kpi.latest_price, 150.0);
        assert_eq!(kpi.price_delta, 50.0);
        assert_eq!(kpi.mean_price, 125.0);
    }

    #[test]
    fn phase_prefix_is_stripped() {
        let ds = dataset(&[("2024-01-01", 150.0, 5.0)]);
        let kpi = summarize(&ds, &[0]).unwrap();
        assert_eq!(kpi.current_phase, "Crescimento");
    }
}
