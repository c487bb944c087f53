/// Data layer: core types, loading, and axis ranges.
///
/// Architecture:
/// ```text
///   raw .csv text
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  content-type check, parse, infer cells → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  headers + Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  range    │  min/max per axis → slider bounds
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod range;
