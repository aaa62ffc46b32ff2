//! Shift distance and free spectral range.

use super::peak::{localize, Extremum};
use super::preprocess::linearize;
use crate::data::model::{ExtremumPoint, Trace, Window, WindowedTrace};
use crate::error::{AnalysisError, AnalysisResult};

// ---------------------------------------------------------------------------
// Shift distance
// ---------------------------------------------------------------------------

/// Wavelength shift of a transmission minimum between two traces.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftDistance {
    /// `minimum_b.wavelength - minimum_a.wavelength`, signed.
    pub shift: f64,
    pub window: Window,
    pub minimum_a: ExtremumPoint,
    pub minimum_b: ExtremumPoint,
    pub windowed_a: WindowedTrace,
    pub windowed_b: WindowedTrace,
    /// Power (dBm) at which the connector between the minima is drawn.
    pub connector_level: f64,
}

impl ShiftDistance {
    pub fn label(&self) -> String {
        format!("Shift distance: {:.3} nm", self.shift.abs())
    }
}

/// Locate the dBm minimum of both traces inside `(start, end)` and measure how
/// far the second one moved.
pub fn shift_distance(
    trace_a: &Trace,
    trace_b: &Trace,
    window_start: f64,
    window_end: f64,
) -> AnalysisResult<ShiftDistance> {
    let window = Window::new(window_start, window_end)?;

    let (minimum_a, windowed_a) = localize(
        trace_a.wavelength(),
        trace_a.power_dbm(),
        window,
        Extremum::Minimum,
    )?;
    let (minimum_b, windowed_b) = localize(
        trace_b.wavelength(),
        trace_b.power_dbm(),
        window,
        Extremum::Minimum,
    )?;

    Ok(ShiftDistance {
        shift: minimum_b.wavelength - minimum_a.wavelength,
        window,
        minimum_a,
        minimum_b,
        windowed_a,
        windowed_b,
        connector_level: minimum_b.power,
    })
}

// ---------------------------------------------------------------------------
// Free spectral range
// ---------------------------------------------------------------------------

/// Spacing between two transmission maxima of one linearized trace.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeSpectralRange {
    /// `peak_2.wavelength - peak_1.wavelength`
    pub fsr: f64,
    pub window_1: Window,
    pub window_2: Window,
    /// Maxima in µW.
    pub peak_1: ExtremumPoint,
    pub peak_2: ExtremumPoint,
    pub wavelength: Vec<f64>,
    /// The whole trace in µW.
    pub linear: Vec<f64>,
}

impl FreeSpectralRange {
    pub fn label(&self) -> String {
        format!("FSR: {:.3} nm", self.fsr)
    }
}

/// Locate the linear maximum inside each peak window and measure their
/// spacing.
///
/// Only `peak1_end < peak2_end` is required between the windows; overlapping
/// windows are accepted and logged.
pub fn free_spectral_range(
    trace: &Trace,
    peak1_start: f64,
    peak1_end: f64,
    peak2_start: f64,
    peak2_end: f64,
) -> AnalysisResult<FreeSpectralRange> {
    let window_1 = Window::new(peak1_start, peak1_end)?;
    let window_2 = Window::new(peak2_start, peak2_end)?;
    if peak1_end >= peak2_end {
        return Err(AnalysisError::invalid(format!(
            "Parameters out of bounds! Peak 1 must end before peak 2 ({peak1_end} >= {peak2_end})"
        )));
    }
    if window_1.overlaps(&window_2) {
        log::warn!("FSR peak windows {window_1} and {window_2} overlap");
    }

    let linear = linearize(trace.power_dbm());
    let (peak_1, _) = localize(trace.wavelength(), &linear, window_1, Extremum::Maximum)?;
    let (peak_2, _) = localize(trace.wavelength(), &linear, window_2, Extremum::Maximum)?;

    Ok(FreeSpectralRange {
        fsr: peak_2.wavelength - peak_1.wavelength,
        window_1,
        window_2,
        peak_1,
        peak_2,
        wavelength: trace.wavelength().to_vec(),
        linear,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// MZI-like dBm trace: transmission minima every `period` nm from `offset`.
    fn mzi_trace(offset: f64, period: f64) -> Trace {
        Trace::from_samples((0..=3500).map(|i| {
            let wl = 1480.0 + i as f64 * 0.01;
            let phase = 2.0 * std::f64::consts::PI * (wl - offset) / period;
            let linear = 0.51 - 0.5 * phase.cos();
            (wl, 10.0 * linear.log10())
        }))
        .unwrap()
    }

    #[test]
    fn test_shift_distance_measures_offset() {
        let a = mzi_trace(1495.0, 12.0);
        let b = mzi_trace(1496.25, 12.0);

        let result = shift_distance(&a, &b, 1490.0, 1500.0).unwrap();
        assert!((result.minimum_a.wavelength - 1495.0).abs() < 0.011);
        assert!((result.minimum_b.wavelength - 1496.25).abs() < 0.011);
        assert!((result.shift - 1.25).abs() < 0.02);
        assert_eq!(result.connector_level, result.minimum_b.power);
        assert_eq!(result.label(), format!("Shift distance: {:.3} nm", result.shift.abs()));
    }

    #[test]
    fn test_shift_distance_is_antisymmetric() {
        let a = mzi_trace(1495.0, 12.0);
        let b = mzi_trace(1493.4, 12.0);

        let ab = shift_distance(&a, &b, 1488.0, 1500.0).unwrap();
        let ba = shift_distance(&b, &a, 1488.0, 1500.0).unwrap();
        assert_eq!(ab.shift, -ba.shift);
        assert!(ab.shift < 0.0);
    }

    #[test]
    fn test_shift_distance_windows_only_the_interval() {
        let a = mzi_trace(1495.0, 12.0);
        let result = shift_distance(&a, &a, 1490.0, 1500.0).unwrap();

        assert_eq!(result.shift, 0.0);
        assert!(result
            .windowed_a
            .wavelength
            .iter()
            .all(|&wl| wl > 1490.0 && wl < 1500.0));
        assert_eq!(result.windowed_a, result.windowed_b);
    }

    #[test]
    fn test_shift_distance_rejects_reversed_window() {
        let a = mzi_trace(1495.0, 12.0);
        for (start, end) in [(1500.0, 1490.0), (1495.0, 1495.0)] {
            let err = shift_distance(&a, &a, start, end).unwrap_err();
            assert!(matches!(err, AnalysisError::InputValidation(_)));
        }
    }

    #[test]
    fn test_shift_distance_empty_window() {
        let a = mzi_trace(1495.0, 12.0);
        let err = shift_distance(&a, &a, 1600.0, 1610.0).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyWindow { start: 1600.0, end: 1610.0 });
    }

    #[test]
    fn test_fsr_between_adjacent_peaks() {
        // Maxima half a period after each minimum: 1489, 1501, 1513.
        let trace = mzi_trace(1495.0, 12.0);

        let result = free_spectral_range(&trace, 1485.0, 1493.0, 1497.0, 1505.0).unwrap();
        assert!((result.peak_1.wavelength - 1489.0).abs() < 0.011);
        assert!((result.peak_2.wavelength - 1501.0).abs() < 0.011);
        assert!(result.fsr > 0.0);
        assert!((result.fsr - 12.0).abs() < 0.02);
        assert_eq!(result.linear.len(), trace.len());
        assert!(result.peak_1.power > 1000.0 * 0.9);
    }

    #[test]
    fn test_fsr_bounds_validation() {
        let trace = mzi_trace(1495.0, 12.0);

        let reversed_first = free_spectral_range(&trace, 1493.0, 1485.0, 1497.0, 1505.0);
        let reversed_second = free_spectral_range(&trace, 1485.0, 1493.0, 1505.0, 1497.0);
        let peaks_swapped = free_spectral_range(&trace, 1497.0, 1505.0, 1485.0, 1493.0);

        for result in [reversed_first, reversed_second, peaks_swapped] {
            assert!(matches!(result, Err(AnalysisError::InputValidation(_))));
        }
    }

    #[test]
    fn test_fsr_accepts_overlapping_windows() {
        let trace = mzi_trace(1495.0, 12.0);
        let result = free_spectral_range(&trace, 1485.0, 1499.0, 1492.0, 1505.0).unwrap();
        assert!(result.fsr > 0.0);
    }
}
