//! dBm → µW conversion and normalization to [-1, 1].

use crate::error::{AnalysisError, AnalysisResult};

/// Convert one dBm sample to microwatts.
pub fn dbm_to_microwatts(dbm: f64) -> f64 {
    10f64.powf(dbm / 10.0) * 1000.0
}

/// Linear power (µW) for every sample. Same length as the input.
pub fn linearize(power_dbm: &[f64]) -> Vec<f64> {
    power_dbm.iter().copied().map(dbm_to_microwatts).collect()
}

/// Map linear power into [-1, 1], taking the trace's own maximum as full
/// transmission.
///
/// Fails when the maximum is zero, negative or not finite. An empty slice has
/// no maximum and fails the same way.
pub fn normalize(linear: &[f64]) -> AnalysisResult<Vec<f64>> {
    let max = linear.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return Err(AnalysisError::DegenerateNormalization { max });
    }
    Ok(linear.iter().map(|&p| (p / max) * 2.0 - 1.0).collect())
}

/// Linearize then normalize a dBm trace.
pub fn preprocess(power_dbm: &[f64]) -> AnalysisResult<Vec<f64>> {
    normalize(&linearize(power_dbm))
}
