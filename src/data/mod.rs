/// Data layer: core types, loading, and per-domain filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BenchmarkTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ BenchmarkTable │  Vec<Record>, skipped-line count
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  exact domain match (+ sort) → DomainSeries
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
