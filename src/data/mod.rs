/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SightingCollection
///   └──────────┘
///        │
///        ▼
///   ┌────────────────────┐
///   │ SightingCollection │  Vec<Sighting>, column names
///   └────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date range + regions → new SightingCollection
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  top-N, daily / monthly counts, summary stats
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
