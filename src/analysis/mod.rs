/// Numerical analysis of transmission traces.
///
/// ```text
///   Trace (dBm)
///      │
///      ├── preprocess ── linear µW ── normalized [-1, 1]
///      │                                   │
///      │                                   ▼
///      │                     fit ── grid of E seeds ── solver (LM)
///      │
///      └── peak ── windowed extremum ── metrics (shift, FSR)
/// ```
///
/// `request` ties these to a [`TraceCollection`](crate::data::collection::TraceCollection).

pub mod fit;
pub mod metrics;
pub mod peak;
pub mod preprocess;
pub mod request;
pub mod solver;
