/// Data layer: trace types, CSV import, and the session's trace collection.
///
/// Architecture:
/// ```text
///   two-column .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Trace
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ TraceCollection │  "Spectral Response N" → Trace
///   └────────────────┘
///        │
///        ▼
///   analysis requests (fit, shift, FSR)
/// ```

pub mod collection;
pub mod loader;
pub mod model;
