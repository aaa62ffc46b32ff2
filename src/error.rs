//! Error types of the analysis core

use thiserror::Error;

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that terminate an analysis action before anything is displayed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Reversed bounds, wrong trace selection, not enough traces imported
    #[error("{0}")]
    InputValidation(String),

    /// A window selected no samples of a trace
    #[error("No samples between {start} nm and {end} nm")]
    EmptyWindow { start: f64, end: f64 },

    /// The nonlinear least squares refinement did not converge
    #[error("Cosine fit did not converge after {iterations} iterations: {reason}")]
    FitConvergence { iterations: usize, reason: String },

    /// Maximum linear power is zero or not finite
    #[error("Cannot normalize trace: maximum linear power is {max}")]
    DegenerateNormalization { max: f64 },
}

impl AnalysisError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        AnalysisError::InputValidation(reason.into())
    }
}
