/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  remote CSV / local .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → HousingDataset (cached for the process)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ HousingDataset │  Vec<ObservationRow>, categorical indexes
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year / age group selections → visible indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  per-cell ratio means, rent ranking, size means
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
