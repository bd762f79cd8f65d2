use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::MarketDataset;

// ---------------------------------------------------------------------------
// Filter criteria: date range + phase/year multiselects
// ---------------------------------------------------------------------------

/// The user's current selection. Built fresh per interaction and applied as a
/// whole; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive start of the date range.
    pub start: NaiveDate,
    /// Inclusive end of the date range.
    pub end: NaiveDate,
    /// Selected crop-cycle phases. An empty set selects nothing.
    pub phases: BTreeSet<String>,
    /// Selected fiscal years. An empty set selects nothing.
    pub years: BTreeSet<i32>,
}

impl FilterCriteria {
    /// Criteria selecting the entire dataset: full date range, every phase,
    /// every year. The sidebar starts from this.
    pub fn select_all(dataset: &MarketDataset) -> Self {
        FilterCriteria {
            start: dataset.min_date,
            end: dataset.max_date,
            phases: dataset.phases.clone(),
            years: dataset.years.clone(),
        }
    }
}

/// Return indices of records passing all three predicates conjunctively:
/// date within `[start, end]`, phase selected, year selected.
///
/// Pure and deterministic; an empty phase or year selection matches no
/// record at all (the pandas `isin([])` reading of an empty multiselect).
pub fn filtered_indices(dataset: &MarketDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.date >= criteria.start
                && r.date <= criteria.end
                && criteria.phases.contains(&r.phase)
                && criteria.years.contains(&r.year)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MarketRecord;

    fn dataset() -> MarketDataset {
        let rows = [
            ("2023-11-10", 148.0, "1.Plantio"),
            ("2024-01-01", 150.0, "2.Crescimento"),
            ("2024-01-02", 152.0, "2.Crescimento"),
            ("2024-03-15", 155.0, "3.Colheita"),
        ];
        MarketDataset::from_records(
            rows.iter()
                .map(|(d, p, ph)| {
                    MarketRecord::new(d.parse().unwrap(), *p, 5.0, ph.to_string(), 0.0, 0.0)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn select_all_passes_everything() {
        let ds = dataset();
        let view = filtered_indices(&ds, &FilterCriteria::select_all(&ds));
        assert_eq!(view, vec![0, 1, 2, 3]);
    }

    #[test]
    fn every_match_satisfies_all_predicates() {
        let ds = dataset();
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.start = "2024-01-01".parse().unwrap();
        criteria.phases = ["2.Crescimento".to_string()].into();
        criteria.years = [2024].into();

        let view = filtered_indices(&ds, &criteria);
        assert!(!view.is_empty());
        for &i in &view {
            let r = &ds.records[i];
            assert!(r.date >= criteria.start && r.date <= criteria.end);
            assert!(criteria.phases.contains(&r.phase));
            assert!(criteria.years.contains(&r.year));
        }
        assert_eq!(view, vec![1, 2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = dataset();
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.years = [2024].into();
        assert_eq!(
            filtered_indices(&ds, &criteria),
            filtered_indices(&ds, &criteria)
        );
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let ds = dataset();
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.start = "2024-01-01".parse().unwrap();
        criteria.end = "2024-01-02".parse().unwrap();
        assert_eq!(filtered_indices(&ds, &criteria), vec![1, 2]);
    }

    #[test]
    fn empty_multiselect_excludes_everything() {
        let ds = dataset();
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.phases.clear();
        assert!(filtered_indices(&ds, &criteria).is_empty());

        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.years.clear();
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn year_with_no_records_yields_empty_view() {
        let ds = dataset();
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.years = [2025].into();
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }
}
