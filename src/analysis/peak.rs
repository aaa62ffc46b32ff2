use crate::data::model::{ExtremumPoint, Trace, Window, WindowedTrace};
use crate::error::{AnalysisError, AnalysisResult};

/// Which extremum to look for inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Minimum,
    Maximum,
}

impl Extremum {
    fn beats(self, candidate: f64, current: f64) -> bool {
        match self {
            Extremum::Minimum => candidate < current,
            Extremum::Maximum => candidate > current,
        }
    }
}

/// Samples whose wavelength lies strictly inside `window`.
pub fn restrict(wavelength: &[f64], power: &[f64], window: Window) -> WindowedTrace {
    let (wavelength, power): (Vec<f64>, Vec<f64>) = wavelength
        .iter()
        .zip(power)
        .filter(|(wl, _)| window.contains(**wl))
        .map(|(&wl, &p)| (wl, p))
        .unzip();
    WindowedTrace { wavelength, power }
}

/// Extremal sample of a windowed trace. First sample wins a tie; NaN powers
/// never win.
pub fn extremum_of(windowed: &WindowedTrace, extremum: Extremum) -> Option<ExtremumPoint> {
    let mut best: Option<ExtremumPoint> = None;
    for (&wavelength, &power) in windowed.wavelength.iter().zip(&windowed.power) {
        if power.is_nan() {
            continue;
        }
        if best.map_or(true, |b| extremum.beats(power, b.power)) {
            best = Some(ExtremumPoint { wavelength, power });
        }
    }
    best
}

/// Restrict `(wavelength, power)` to `window` and find its extremum.
///
/// Returns the extremum and the windowed samples it was taken from.
pub fn localize(
    wavelength: &[f64],
    power: &[f64],
    window: Window,
    extremum: Extremum,
) -> AnalysisResult<(ExtremumPoint, WindowedTrace)> {
    let windowed = restrict(wavelength, power, window);
    let point = extremum_of(&windowed, extremum).ok_or(AnalysisError::EmptyWindow {
        start: window.start(),
        end: window.end(),
    })?;
    Ok((point, windowed))
}

/// Lowest dBm sample of `trace` inside `window`.
pub fn localize_minimum(trace: &Trace, window: Window) -> AnalysisResult<ExtremumPoint> {
    localize(trace.wavelength(), trace.power_dbm(), window, Extremum::Minimum).map(|(p, _)| p)
}

/// Highest dBm sample of `trace` inside `window`.
pub fn localize_maximum(trace: &Trace, window: Window) -> AnalysisResult<ExtremumPoint> {
    localize(trace.wavelength(), trace.power_dbm(), window, Extremum::Maximum).map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_samples() -> Trace {
        Trace::from_samples(vec![(1500.0, -10.0), (1502.0, -5.0)]).unwrap()
    }

    #[test]
    fn test_two_sample_extrema() {
        let trace = two_samples();
        let window = Window::new(1499.0, 1503.0).unwrap();

        assert_eq!(
            localize_minimum(&trace, window).unwrap(),
            ExtremumPoint { wavelength: 1500.0, power: -10.0 }
        );
        assert_eq!(
            localize_maximum(&trace, window).unwrap(),
            ExtremumPoint { wavelength: 1502.0, power: -5.0 }
        );
    }

    #[test]
    fn test_window_bounds_are_excluded() {
        let trace = two_samples();
        let window = Window::new(1500.0, 1502.0).unwrap();

        let err = localize_minimum(&trace, window).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyWindow { start: 1500.0, end: 1502.0 });
    }

    #[test]
    fn test_tie_takes_first_sample() {
        let trace = Trace::from_samples(vec![
            (1500.0, -7.0),
            (1500.5, -9.0),
            (1501.0, -9.0),
            (1501.5, -7.0),
        ])
        .unwrap();
        let window = Window::new(1499.0, 1502.0).unwrap();

        assert_eq!(localize_minimum(&trace, window).unwrap().wavelength, 1500.5);
        assert_eq!(localize_maximum(&trace, window).unwrap().wavelength, 1500.0);
    }

    #[test]
    fn test_nan_samples_are_skipped() {
        let trace = Trace::from_samples(vec![(1500.0, f64::NAN), (1501.0, -3.0)]).unwrap();
        let window = Window::new(1499.0, 1502.0).unwrap();
        assert_eq!(localize_minimum(&trace, window).unwrap().wavelength, 1501.0);

        let only_nan = Window::new(1499.0, 1500.5).unwrap();
        assert!(localize_minimum(&trace, only_nan).is_err());
    }

    #[test]
    fn test_restrict_keeps_order() {
        let trace = Trace::from_samples((0..10).map(|i| (1500.0 + i as f64, -(i as f64)))).unwrap();
        let window = Window::new(1502.0, 1506.0).unwrap();

        let windowed = restrict(trace.wavelength(), trace.power_dbm(), window);
        assert_eq!(windowed.wavelength, vec![1503.0, 1504.0, 1505.0]);
        assert_eq!(windowed.power, vec![-3.0, -4.0, -5.0]);
    }
}
