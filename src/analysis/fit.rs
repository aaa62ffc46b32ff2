//! Cosine fit engine.
//!
//! Fits `y(x) = D * cos(E * x)` to a normalized trace. The cost surface in
//! `E` oscillates quickly because `x` is a wavelength around 1500 nm, so a
//! single local fit lands in whichever valley its seed starts in. The engine
//! therefore refits from every point of an evenly spaced `E` grid, keeps the
//! seed whose refit has the lowest sum of squares, and refits once more from
//! that seed.

use serde::{Deserialize, Serialize};

use super::preprocess::preprocess;
use super::solver::{levenberg_marquardt, Solution, SolverSettings};
use crate::data::model::Trace;
use crate::error::{AnalysisError, AnalysisResult};

/// Tunables of the cosine fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Number of `E` seeds in the search grid.
    pub grid_size: usize,
    /// Iteration limit of each Levenberg–Marquardt run.
    pub max_iterations: usize,
    pub ftol: f64,
    pub xtol: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        let solver = SolverSettings::default();
        Self {
            grid_size: 100,
            max_iterations: solver.max_iterations,
            ftol: solver.ftol,
            xtol: solver.xtol,
        }
    }
}

impl FitOptions {
    fn solver(&self) -> SolverSettings {
        SolverSettings {
            max_iterations: self.max_iterations,
            ftol: self.ftol,
            xtol: self.xtol,
        }
    }
}

/// Best-fit cosine together with the data it was fitted to.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Amplitude `D`.
    pub amplitude: f64,
    /// Angular frequency coefficient `E` (rad/nm).
    pub angular_frequency: f64,
    /// Sum of squared residuals of the final fit.
    pub sum_sq_error: f64,
    /// Seed of the final refit, taken from the grid.
    pub seed: f64,
    pub wavelength: Vec<f64>,
    pub normalized: Vec<f64>,
    /// `D * cos(E * x)` at every wavelength.
    pub fitted: Vec<f64>,
}

/// `D * cos(E * x)`
pub fn cosine(x: f64, amplitude: f64, angular_frequency: f64) -> f64 {
    amplitude * (angular_frequency * x).cos()
}

fn cosine_model(x: f64, p: [f64; 2]) -> (f64, [f64; 2]) {
    let (sin, cos) = (p[1] * x).sin_cos();
    (p[0] * cos, [cos, -p[0] * x * sin])
}

/// `n` evenly spaced values from `start` to `end`, both included.
pub fn frequency_grid(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Fitter bound to one data set
// ---------------------------------------------------------------------------

/// Grid search and refinement over one `(x, y)` data set.
#[derive(Debug, Clone, Copy)]
pub struct CosineFitter<'a> {
    x: &'a [f64],
    y: &'a [f64],
    solver: SolverSettings,
}

impl<'a> CosineFitter<'a> {
    pub fn new(x: &'a [f64], y: &'a [f64], options: &FitOptions) -> Self {
        Self {
            x,
            y,
            solver: options.solver(),
        }
    }

    /// Levenberg–Marquardt from `(D = 1, E = seed)`.
    pub fn refit(&self, seed: f64) -> AnalysisResult<Solution> {
        levenberg_marquardt(self.x, self.y, [1.0, seed], &self.solver, cosine_model)
    }

    /// Sum of squares reached from `seed`, `+∞` when the refit fails.
    pub fn candidate_error(&self, seed: f64) -> f64 {
        match self.refit(seed) {
            Ok(solution) => solution.sum_sq,
            Err(e) => {
                log::debug!("seed E={seed:.6} rejected: {e}");
                f64::INFINITY
            }
        }
    }

    /// Index of the seed with the lowest error; first one wins a tie.
    /// `None` when no seed converged.
    pub fn best_seed(&self, grid: &[f64]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &seed) in grid.iter().enumerate() {
            let error = self.candidate_error(seed);
            if !error.is_finite() {
                continue;
            }
            if best.map_or(true, |(_, e)| error < e) {
                best = Some((i, error));
            }
        }
        best.map(|(i, _)| i)
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Fit a cosine to `trace` with the default options.
///
/// `search_start..=search_end` bounds the `E` grid, not the wavelength domain:
/// the whole trace is fitted.
pub fn fit_cosine(trace: &Trace, search_start: f64, search_end: f64) -> AnalysisResult<FitResult> {
    fit_cosine_with(trace, search_start, search_end, &FitOptions::default())
}

/// Fit a cosine to `trace` with explicit options.
pub fn fit_cosine_with(
    trace: &Trace,
    search_start: f64,
    search_end: f64,
    options: &FitOptions,
) -> AnalysisResult<FitResult> {
    validate_search(search_start, search_end, options)?;
    let normalized = preprocess(trace.power_dbm())?;
    fit_normalized(trace.wavelength(), &normalized, search_start, search_end, options)
}

/// Fit a cosine to data that is already normalized.
pub fn fit_normalized(
    x: &[f64],
    y: &[f64],
    search_start: f64,
    search_end: f64,
    options: &FitOptions,
) -> AnalysisResult<FitResult> {
    validate_search(search_start, search_end, options)?;
    if x.len() != y.len() {
        return Err(AnalysisError::invalid(format!(
            "x has {} values but y has {}",
            x.len(),
            y.len()
        )));
    }

    let fitter = CosineFitter::new(x, y, options);
    let grid = frequency_grid(search_start, search_end, options.grid_size);

    let best = fitter
        .best_seed(&grid)
        .ok_or_else(|| AnalysisError::FitConvergence {
            iterations: options.max_iterations,
            reason: format!(
                "no seed in E ∈ [{search_start}, {search_end}] converged ({} tried)",
                grid.len()
            ),
        })?;
    let seed = grid[best];

    let solution = fitter.refit(seed)?;
    let [amplitude, angular_frequency] = solution.params;
    log::info!(
        "cosine fit: D={amplitude:.6}, E={angular_frequency:.6} from seed {seed:.6} \
         ({} iterations, sum of squares {:.4e})",
        solution.iterations,
        solution.sum_sq
    );

    Ok(FitResult {
        amplitude,
        angular_frequency,
        sum_sq_error: solution.sum_sq,
        seed,
        wavelength: x.to_vec(),
        normalized: y.to_vec(),
        fitted: x
            .iter()
            .map(|&xi| cosine(xi, amplitude, angular_frequency))
            .collect(),
    })
}

fn validate_search(start: f64, end: f64, options: &FitOptions) -> AnalysisResult<()> {
    if !start.is_finite() || !end.is_finite() {
        return Err(AnalysisError::invalid(format!(
            "search bounds must be finite, got {start} and {end}"
        )));
    }
    if end <= start {
        return Err(AnalysisError::invalid(format!(
            "Start value greater than end value! ({start} >= {end})"
        )));
    }
    if options.grid_size == 0 {
        return Err(AnalysisError::invalid("grid size must be at least 1"));
    }
    Ok(())
}
