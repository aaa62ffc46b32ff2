use std::fmt;

use crate::error::{AnalysisError, AnalysisResult};

// ---------------------------------------------------------------------------
// Trace – one imported measurement
// ---------------------------------------------------------------------------

/// A single spectral response: wavelength (nm) against power (dBm).
///
/// Samples keep their acquisition order. Increasing wavelength is expected
/// but not required. A trace is never empty and is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    wavelength: Vec<f64>,
    power_dbm: Vec<f64>,
}

impl Trace {
    /// Build a trace from its two columns.
    pub fn new(wavelength: Vec<f64>, power_dbm: Vec<f64>) -> AnalysisResult<Self> {
        if wavelength.len() != power_dbm.len() {
            return Err(AnalysisError::invalid(format!(
                "wavelength has {} values but power has {}",
                wavelength.len(),
                power_dbm.len()
            )));
        }
        if wavelength.is_empty() {
            return Err(AnalysisError::invalid("trace contains no samples"));
        }
        Ok(Trace {
            wavelength,
            power_dbm,
        })
    }

    /// Build a trace from `(wavelength, power)` pairs.
    pub fn from_samples<I>(samples: I) -> AnalysisResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (wavelength, power_dbm): (Vec<f64>, Vec<f64>) = samples.into_iter().unzip();
        Trace::new(wavelength, power_dbm)
    }

    /// Wavelength axis in nanometres.
    pub fn wavelength(&self) -> &[f64] {
        &self.wavelength
    }

    /// Power axis in dBm.
    pub fn power_dbm(&self) -> &[f64] {
        &self.power_dbm
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Always false for a constructed trace; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// Whether wavelengths strictly increase from sample to sample.
    pub fn is_increasing(&self) -> bool {
        self.wavelength.windows(2).all(|w| w[0] < w[1])
    }

    /// `(wavelength, power)` pairs in acquisition order.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wavelength
            .iter()
            .copied()
            .zip(self.power_dbm.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Window – open wavelength interval
// ---------------------------------------------------------------------------

/// Open interval `(start, end)` in nanometres. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    start: f64,
    end: f64,
}

impl Window {
    pub fn new(start: f64, end: f64) -> AnalysisResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(AnalysisError::invalid(format!(
                "window bounds must be finite, got {start} and {end}"
            )));
        }
        if end <= start {
            return Err(AnalysisError::invalid(format!(
                "Start value greater than end value! ({start} >= {end})"
            )));
        }
        Ok(Window { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Strict containment, both bounds excluded.
    pub fn contains(&self, wavelength: f64) -> bool {
        wavelength > self.start && wavelength < self.end
    }

    /// Whether the two windows share any wavelength.
    pub fn overlaps(&self, other: &Window) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3} nm, {:.3} nm)", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// The sample of a window that reaches the extremal power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremumPoint {
    pub wavelength: f64,
    /// dBm for minima of raw traces, µW for maxima of linearized traces.
    pub power: f64,
}

/// Samples of a trace that fall inside a window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowedTrace {
    pub wavelength: Vec<f64>,
    pub power: Vec<f64>,
}

impl WindowedTrace {
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_rejects_mismatched_columns() {
        let err = Trace::new(vec![1500.0, 1501.0], vec![-3.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::InputValidation(_)));
    }

    #[test]
    fn test_trace_rejects_empty() {
        assert!(Trace::from_samples(Vec::new()).is_err());
    }

    #[test]
    fn test_trace_samples_keep_order() {
        let trace = Trace::from_samples(vec![(1500.0, -1.0), (1499.0, -2.0)]).unwrap();
        let samples: Vec<_> = trace.samples().collect();
        assert_eq!(samples, vec![(1500.0, -1.0), (1499.0, -2.0)]);
        assert!(!trace.is_increasing());
    }

    #[test]
    fn test_window_ordering() {
        assert!(Window::new(1500.0, 1500.0).is_err());
        assert!(Window::new(1501.0, 1500.0).is_err());
        assert!(Window::new(f64::NAN, 1500.0).is_err());

        let w = Window::new(1499.0, 1503.0).unwrap();
        assert!(w.contains(1500.0));
        assert!(!w.contains(1499.0));
        assert!(!w.contains(1503.0));
    }

    #[test]
    fn test_window_overlap() {
        let a = Window::new(1490.0, 1495.0).unwrap();
        let b = Window::new(1494.0, 1500.0).unwrap();
        let c = Window::new(1495.0, 1500.0).unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
