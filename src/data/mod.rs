/// Data layer: core types, loading, filtering and summarization.
///
/// Architecture:
/// ```text
///  soja_dashboard_final.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → MarketDataset (memoized per session)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ MarketDataset │  sorted records + phase/year indices
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  filter   │ ───▶ │ kpi/stats │  view indices → metrics & aggregates
///   └──────────┘      └──────────┘
/// ```
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod model;
pub mod stats;
