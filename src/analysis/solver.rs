//! Levenberg–Marquardt least squares for two-parameter models.
//!
//! The model is passed as a closure returning the value and the gradient with
//! respect to both parameters at one abscissa. The data slices are borrowed
//! for the duration of the call, so the solver holds no state between fits.
//!
//! With two parameters the damped normal equations are a 2×2 system and are
//! solved in closed form.

use crate::error::{AnalysisError, AnalysisResult};

const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_MIN: f64 = 1e-12;
const LAMBDA_MAX: f64 = 1e16;
/// Lower bound on a diagonal entry used for Marquardt scaling.
const DIAG_FLOOR: f64 = 1e-12;
/// Sum of squares treated as an exact fit.
const EXACT_FIT: f64 = f64::EPSILON * f64::EPSILON;

/// Stopping rules of the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    pub max_iterations: usize,
    /// Relative reduction of the sum of squares below which the fit stops.
    pub ftol: f64,
    /// Relative parameter step below which the fit stops.
    pub xtol: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            ftol: 1.49012e-8,
            xtol: 1.49012e-8,
        }
    }
}

/// A converged fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub params: [f64; 2],
    pub sum_sq: f64,
    pub iterations: usize,
}

/// Sum of squared residuals of `model` against `(x, y)`.
pub fn sum_of_squares<F>(x: &[f64], y: &[f64], params: [f64; 2], model: &F) -> f64
where
    F: Fn(f64, [f64; 2]) -> (f64, [f64; 2]),
{
    x.iter()
        .zip(y)
        .map(|(&xi, &yi)| {
            let r = yi - model(xi, params).0;
            r * r
        })
        .sum()
}

/// Minimise the squared residuals of `model` starting from `init`.
pub fn levenberg_marquardt<F>(
    x: &[f64],
    y: &[f64],
    init: [f64; 2],
    settings: &SolverSettings,
    model: F,
) -> AnalysisResult<Solution>
where
    F: Fn(f64, [f64; 2]) -> (f64, [f64; 2]),
{
    let mut params = init;
    let mut cost = sum_of_squares(x, y, params, &model);
    if !cost.is_finite() {
        return Err(AnalysisError::FitConvergence {
            iterations: 0,
            reason: format!("non-finite residuals at initial guess {init:?}"),
        });
    }

    let mut lambda = LAMBDA_INIT;

    for iteration in 1..=settings.max_iterations {
        if cost <= EXACT_FIT {
            return Ok(Solution {
                params,
                sum_sq: cost,
                iterations: iteration - 1,
            });
        }

        let (jtj, jtr) = normal_equations(x, y, params, &model);

        // Raise the damping until a step stops increasing the cost.
        loop {
            if lambda > LAMBDA_MAX {
                // No damped step lowers the cost: stationary point.
                return Ok(Solution {
                    params,
                    sum_sq: cost,
                    iterations: iteration,
                });
            }

            let Some(step) = damped_step(&jtj, &jtr, lambda) else {
                lambda *= 10.0;
                continue;
            };

            let trial = [params[0] + step[0], params[1] + step[1]];
            let trial_cost = sum_of_squares(x, y, trial, &model);

            if trial_cost.is_finite() && trial_cost <= cost {
                let gauss_newton = lambda <= 1.0;
                let small_step = step
                    .iter()
                    .zip(params.iter())
                    .all(|(s, p)| s.abs() <= settings.xtol * (p.abs() + settings.xtol));
                let small_reduction = cost - trial_cost <= settings.ftol * cost;

                params = trial;
                cost = trial_cost;
                lambda = (lambda / 10.0).max(LAMBDA_MIN);

                if gauss_newton && (small_step || small_reduction) {
                    return Ok(Solution {
                        params,
                        sum_sq: cost,
                        iterations: iteration,
                    });
                }
                break;
            }

            lambda *= 10.0;
        }
    }

    Err(AnalysisError::FitConvergence {
        iterations: settings.max_iterations,
        reason: format!(
            "iteration limit reached at D={:.6}, E={:.6} (sum of squares {cost:.3e})",
            params[0], params[1]
        ),
    })
}

/// `JᵀJ` as `[a11, a12, a22]` and `Jᵀr` for residuals `r = y - f`.
fn normal_equations<F>(x: &[f64], y: &[f64], params: [f64; 2], model: &F) -> ([f64; 3], [f64; 2])
where
    F: Fn(f64, [f64; 2]) -> (f64, [f64; 2]),
{
    let mut jtj = [0.0; 3];
    let mut jtr = [0.0; 2];
    for (&xi, &yi) in x.iter().zip(y) {
        let (f, [j0, j1]) = model(xi, params);
        let r = yi - f;
        jtj[0] += j0 * j0;
        jtj[1] += j0 * j1;
        jtj[2] += j1 * j1;
        jtr[0] += j0 * r;
        jtr[1] += j1 * r;
    }
    (jtj, jtr)
}

/// Solve `(JᵀJ + λ·diag(JᵀJ)) δ = Jᵀr`. `None` when the system is singular.
fn damped_step(jtj: &[f64; 3], jtr: &[f64; 2], lambda: f64) -> Option<[f64; 2]> {
    let [a11, a12, a22] = *jtj;
    let d1 = a11 + lambda * a11.max(DIAG_FLOOR);
    let d2 = a22 + lambda * a22.max(DIAG_FLOOR);
    let det = d1 * d2 - a12 * a12;
    if !det.is_finite() || det <= 0.0 {
        return None;
    }
    Some([
        (jtr[0] * d2 - a12 * jtr[1]) / det,
        (d1 * jtr[1] - a12 * jtr[0]) / det,
    ])
}
