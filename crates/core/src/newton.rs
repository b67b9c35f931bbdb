//! Newton-Raphson iteration used by Kepler propagation and the Lambert solver.
//!
//! The stopping rule tests the iterate itself against the tolerance (`x <= tolerance`), not the
//! step size. For roots well above the tolerance the loop runs until the iteration budget is
//! spent. Non-convergence is never reported as an error; the last iterate is returned.

use log::trace;

/// Iteration budget and stopping threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOptions {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1.0e-4,
        }
    }
}

/// Outcome of a Newton solve, including how the loop ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonReport {
    pub root: f64,
    /// Number of Newton updates applied.
    pub iterations: usize,
    /// `true` when the stopping rule fired before the budget ran out.
    pub terminated: bool,
}

/// Solve `f(x) = 0` starting from `guess`, returning the final iterate.
pub fn solve<F, D>(f: F, f_prime: D, guess: f64, options: &NewtonOptions) -> f64
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    solve_with_report(f, f_prime, guess, options).root
}

/// Same iteration as [`solve`], but also reports the iteration count and stop reason.
pub fn solve_with_report<F, D>(
    f: F,
    f_prime: D,
    guess: f64,
    options: &NewtonOptions,
) -> NewtonReport
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut x = guess;
    let mut iterations = 0;
    let mut terminated = false;

    // Counts from 1, so at most `max_iterations - 1` updates.
    for _ in 1..options.max_iterations {
        x -= f(x) / f_prime(x);
        iterations += 1;
        if x <= options.tolerance {
            terminated = true;
            break;
        }
    }

    if !terminated {
        trace!(
            "newton: budget of {} iterations spent, returning x = {x}",
            options.max_iterations
        );
    }

    NewtonReport {
        root: x,
        iterations,
        terminated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn square_root_of_two() {
        let root = solve(|x| x * x - 2.0, |x| 2.0 * x, 1.0, &NewtonOptions::default());
        assert_relative_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn square_root_reached_well_inside_budget() {
        // Six updates are already enough to be within tolerance of the root.
        let options = NewtonOptions {
            max_iterations: 7,
            ..NewtonOptions::default()
        };
        let report = solve_with_report(|x| x * x - 2.0, |x| 2.0 * x, 1.0, &options);
        assert_eq!(report.iterations, 6);
        assert!(!report.terminated);
        assert!((report.root - std::f64::consts::SQRT_2).abs() < options.tolerance);
    }

    #[test]
    fn stops_once_iterate_drops_below_tolerance() {
        // Root at zero: the iterate halves each step until it crosses the threshold.
        let report = solve_with_report(
            |x| x * x,
            |x| 2.0 * x,
            1.0,
            &NewtonOptions::default(),
        );
        assert!(report.terminated);
        assert!(report.root <= 1.0e-4);
        assert_eq!(report.iterations, 14);
    }

    #[test]
    fn zero_derivative_poisons_the_result() {
        let root = solve(|x| x - 1.0, |_| 0.0, 0.5, &NewtonOptions::default());
        assert!(!root.is_finite());
    }

    #[test]
    fn budget_of_one_applies_no_update() {
        let options = NewtonOptions {
            max_iterations: 1,
            ..NewtonOptions::default()
        };
        let report = solve_with_report(|x| x - 3.0, |_| 1.0, 10.0, &options);
        assert_eq!(report.iterations, 0);
        assert_eq!(report.root, 10.0);
    }
}
