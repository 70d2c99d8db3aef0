/// Data layer: raw table types and file loading.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   RawTable    │  Vec<Row>, first-seen column order
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ ColumnNameIndex   │  normalized name → source column
///   └──────────────────┘
/// ```

pub mod loader;
pub mod model;
