//! Request/response objects for the three analyses.
//!
//! A caller (the desktop UI, a test) builds an [`AnalysisRequest`] from user
//! input and executes it against the session's traces. Every check runs
//! before any computation starts.

use super::fit::{fit_cosine_with, FitResult};
use super::metrics::{free_spectral_range, shift_distance, FreeSpectralRange, ShiftDistance};
use crate::config::Settings;
use crate::data::collection::TraceCollection;
use crate::data::model::{Trace, Window};
use crate::error::{AnalysisError, AnalysisResult};

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    /// Fit `D * cos(E * x)` to a trace, searching `E` in the given range.
    CurveFit {
        trace: String,
        search_start: f64,
        search_end: f64,
    },
    /// Shift of the minimum inside one window between two traces.
    ShiftDistance {
        first: String,
        second: String,
        window_start: f64,
        window_end: f64,
    },
    /// Spacing of the maxima inside two windows of one trace.
    FreeSpectralRange {
        trace: String,
        peak1_start: f64,
        peak1_end: f64,
        peak2_start: f64,
        peak2_end: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResponse {
    CurveFit {
        trace: String,
        fit: FitResult,
    },
    ShiftDistance {
        first: String,
        second: String,
        result: ShiftDistance,
    },
    FreeSpectralRange {
        trace: String,
        result: FreeSpectralRange,
    },
}

impl AnalysisRequest {
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisRequest::CurveFit { .. } => "Curve Fit",
            AnalysisRequest::ShiftDistance { .. } => "Temperature Shift",
            AnalysisRequest::FreeSpectralRange { .. } => "FSR",
        }
    }

    /// Traces that must be imported before the request can run.
    pub fn required_traces(&self) -> usize {
        match self {
            AnalysisRequest::ShiftDistance { .. } => 2,
            _ => 1,
        }
    }

    /// Validate the request against `traces` and `settings`, then run it.
    pub fn execute(
        &self,
        traces: &TraceCollection,
        settings: &Settings,
    ) -> AnalysisResult<AnalysisResponse> {
        check_trace_count(traces, self.required_traces())?;

        match self {
            AnalysisRequest::CurveFit {
                trace,
                search_start,
                search_end,
            } => {
                if search_end <= search_start {
                    return Err(AnalysisError::invalid("Start value greater than end value!"));
                }
                settings.check_search_range(*search_start, *search_end)?;
                let data = lookup(traces, trace)?;

                let fit = fit_cosine_with(data, *search_start, *search_end, &settings.fit)?;
                Ok(AnalysisResponse::CurveFit {
                    trace: trace.clone(),
                    fit,
                })
            }
            AnalysisRequest::ShiftDistance {
                first,
                second,
                window_start,
                window_end,
            } => {
                let window = Window::new(*window_start, *window_end)?;
                if first == second {
                    return Err(AnalysisError::invalid("Must select two different signals!"));
                }
                settings.check_window(&window)?;
                let a = lookup(traces, first)?;
                let b = lookup(traces, second)?;

                let result = shift_distance(a, b, *window_start, *window_end)?;
                Ok(AnalysisResponse::ShiftDistance {
                    first: first.clone(),
                    second: second.clone(),
                    result,
                })
            }
            AnalysisRequest::FreeSpectralRange {
                trace,
                peak1_start,
                peak1_end,
                peak2_start,
                peak2_end,
            } => {
                let window_1 = Window::new(*peak1_start, *peak1_end)?;
                let window_2 = Window::new(*peak2_start, *peak2_end)?;
                if peak1_end >= peak2_end {
                    return Err(AnalysisError::invalid(
                        "Parameters out of bounds! Peak 1 must end before peak 2",
                    ));
                }
                settings.check_window(&window_1)?;
                settings.check_window(&window_2)?;
                let data = lookup(traces, trace)?;

                let result =
                    free_spectral_range(data, *peak1_start, *peak1_end, *peak2_start, *peak2_end)?;
                Ok(AnalysisResponse::FreeSpectralRange {
                    trace: trace.clone(),
                    result,
                })
            }
        }
    }
}

impl AnalysisResponse {
    /// One-line description of the result.
    pub fn summary(&self) -> String {
        match self {
            AnalysisResponse::CurveFit { trace, fit } => format!(
                "{trace}: D = {:.4}, E = {:.6} rad/nm (sum of squares {:.4e})",
                fit.amplitude, fit.angular_frequency, fit.sum_sq_error
            ),
            AnalysisResponse::ShiftDistance {
                first,
                second,
                result,
            } => format!(
                "{first} → {second}: shift {:+.3} nm ({:.3} nm → {:.3} nm)",
                result.shift, result.minimum_a.wavelength, result.minimum_b.wavelength
            ),
            AnalysisResponse::FreeSpectralRange { trace, result } => format!(
                "{trace}: FSR {:.3} nm ({:.3} nm → {:.3} nm)",
                result.fsr, result.peak_1.wavelength, result.peak_2.wavelength
            ),
        }
    }
}

fn check_trace_count(traces: &TraceCollection, required: usize) -> AnalysisResult<()> {
    match (traces.len(), required) {
        (n, r) if n >= r => Ok(()),
        (_, 1) => Err(AnalysisError::invalid("No data available!")),
        _ => Err(AnalysisError::invalid(
            "Must have at least two spectral response signals!",
        )),
    }
}

fn lookup<'a>(traces: &'a TraceCollection, label: &str) -> AnalysisResult<&'a Trace> {
    traces
        .get(label)
        .ok_or_else(|| AnalysisError::invalid(format!("Unknown spectral response '{label}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mzi_trace(offset: f64) -> Trace {
        Trace::from_samples((0..=700).map(|i| {
            let wl = 1480.0 + i as f64 * 0.05;
            let phase = 2.0 * std::f64::consts::PI * (wl - offset) / 12.0;
            (wl, 10.0 * (0.51 - 0.5 * phase.cos()).log10())
        }))
        .unwrap()
    }

    fn session(n: usize) -> TraceCollection {
        let mut traces = TraceCollection::new();
        for i in 0..n {
            traces.insert(mzi_trace(1495.0 + i as f64 * 0.5));
        }
        traces
    }

    fn shift(first: &str, second: &str, start: f64, end: f64) -> AnalysisRequest {
        AnalysisRequest::ShiftDistance {
            first: first.into(),
            second: second.into(),
            window_start: start,
            window_end: end,
        }
    }

    fn fsr(p1: (f64, f64), p2: (f64, f64)) -> AnalysisRequest {
        AnalysisRequest::FreeSpectralRange {
            trace: "Spectral Response 1".into(),
            peak1_start: p1.0,
            peak1_end: p1.1,
            peak2_start: p2.0,
            peak2_end: p2.1,
        }
    }

    fn is_invalid(result: AnalysisResult<AnalysisResponse>) -> bool {
        matches!(result, Err(AnalysisError::InputValidation(_)))
    }

    #[test]
    fn test_requires_imported_traces() {
        let settings = Settings::default();
        let empty = TraceCollection::new();
        let one = session(1);

        let fit = AnalysisRequest::CurveFit {
            trace: "Spectral Response 1".into(),
            search_start: 0.5,
            search_end: 0.6,
        };
        assert_eq!(
            fit.execute(&empty, &settings).unwrap_err(),
            AnalysisError::invalid("No data available!")
        );
        assert_eq!(
            shift("Spectral Response 1", "Spectral Response 2", 1490.0, 1500.0)
                .execute(&one, &settings)
                .unwrap_err(),
            AnalysisError::invalid("Must have at least two spectral response signals!")
        );
    }

    #[test]
    fn test_reversed_bounds_rejected_for_every_request() {
        let settings = Settings::default();
        let traces = session(2);
        let snapshot: Vec<String> = traces.labels().map(str::to_owned).collect();

        let requests = [
            AnalysisRequest::CurveFit {
                trace: "Spectral Response 1".into(),
                search_start: 0.6,
                search_end: 0.5,
            },
            shift("Spectral Response 1", "Spectral Response 2", 1500.0, 1500.0),
            fsr((1493.0, 1485.0), (1497.0, 1505.0)),
            fsr((1485.0, 1493.0), (1505.0, 1497.0)),
            fsr((1497.0, 1505.0), (1485.0, 1493.0)),
        ];
        for request in &requests {
            assert!(is_invalid(request.execute(&traces, &settings)), "{request:?}");
        }

        let after: Vec<String> = traces.labels().map(str::to_owned).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn test_shift_needs_two_different_traces() {
        let settings = Settings::default();
        let traces = session(2);

        let err = shift("Spectral Response 1", "Spectral Response 1", 1490.0, 1500.0)
            .execute(&traces, &settings)
            .unwrap_err();
        assert_eq!(err, AnalysisError::invalid("Must select two different signals!"));
    }

    #[test]
    fn test_windows_outside_knobs_rejected() {
        let settings = Settings::default();
        let traces = session(2);

        assert!(is_invalid(
            shift("Spectral Response 1", "Spectral Response 2", 1470.0, 1500.0)
                .execute(&traces, &settings)
        ));
        assert!(is_invalid(
            fsr((1485.0, 1493.0), (1497.0, 1520.0)).execute(&traces, &settings)
        ));
    }

    #[test]
    fn test_unknown_label_rejected() {
        let settings = Settings::default();
        let traces = session(2);
        assert!(is_invalid(
            shift("Spectral Response 1", "Spectral Response 9", 1490.0, 1500.0)
                .execute(&traces, &settings)
        ));
    }

    #[test]
    fn test_shift_and_fsr_responses() {
        let settings = Settings::default();
        let traces = session(2);

        let response = shift("Spectral Response 1", "Spectral Response 2", 1490.0, 1500.0)
            .execute(&traces, &settings)
            .unwrap();
        let AnalysisResponse::ShiftDistance { result, .. } = &response else {
            panic!("unexpected response {response:?}");
        };
        assert!((result.shift - 0.5).abs() < 0.06);
        assert!(response.summary().starts_with("Spectral Response 1 → Spectral Response 2"));

        let response = fsr((1485.0, 1493.0), (1497.0, 1505.0))
            .execute(&traces, &settings)
            .unwrap();
        let AnalysisResponse::FreeSpectralRange { result, .. } = &response else {
            panic!("unexpected response {response:?}");
        };
        assert!((result.fsr - 12.0).abs() < 0.11);
    }

    #[test]
    fn test_curve_fit_response() {
        let settings = Settings::default();
        let traces = session(1);

        // Period 12 nm → E = 2π/12 ≈ 0.5236 rad/nm.
        let response = AnalysisRequest::CurveFit {
            trace: "Spectral Response 1".into(),
            search_start: 0.5,
            search_end: 0.55,
        }
        .execute(&traces, &settings)
        .unwrap();
        let AnalysisResponse::CurveFit { fit, .. } = &response else {
            panic!("unexpected response {response:?}");
        };
        assert_eq!(fit.fitted.len(), 701);
        assert!(fit.sum_sq_error.is_finite());
    }
}
