//! Analysis core for optical transmission spectra.
//!
//! Traces are wavelength (nm) vs. power (dBm) curves, typically measured on
//! Mach-Zehnder interferometers. The crate fits a `D * cos(E * x)` model to a
//! normalized trace, measures the wavelength shift of a minimum between two
//! traces, and measures the free spectral range between two maxima of one
//! trace.
//!
//! The desktop front end in `main.rs` is a thin caller of this library.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;

pub use analysis::fit::{fit_cosine, FitOptions, FitResult};
pub use analysis::metrics::{free_spectral_range, shift_distance, FreeSpectralRange, ShiftDistance};
pub use analysis::request::{AnalysisRequest, AnalysisResponse};
pub use data::collection::TraceCollection;
pub use data::loader::import_trace;
pub use data::model::{ExtremumPoint, Trace, Window};
pub use error::{AnalysisError, AnalysisResult};
