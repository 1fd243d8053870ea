//! Householder iterations on `T(x) = T*` and the initial guesses that seed them.

use std::f64::consts::{LN_2, PI};

use tracing::{debug, trace};

use crate::tof::{dtdx, x2tof};

/// Step tolerance for the zero-revolution branch
pub const ZERO_REV_TOL: f64 = 1e-5;
/// Step tolerance for the multi-revolution branches
pub const MULTI_REV_TOL: f64 = 1e-8;
/// Iteration budget for every branch
pub const MAX_ITERATIONS: u32 = 15;

/// Outcome of one root search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootState {
    /// Last iterate of x
    pub x: f64,
    /// Number of Householder steps taken
    pub iterations: u32,
    /// Whether the last step fell below the tolerance within the budget
    pub converged: bool,
}

/// Solve `T(x, n) = tof_nd` for `x` with the fourth-order Householder update.
///
/// Running out of iterations is not an error: the last iterate is returned
/// with `converged = false`.
pub fn householder(
    tof_nd: f64,
    x0: f64,
    lambda: f64,
    n: u32,
    tol: f64,
    max_iter: u32,
) -> RootState {
    let mut x = x0;
    let mut err = f64::INFINITY;
    let mut iterations = 0;

    while err > tol && iterations < max_iter {
        let tof = x2tof(x, lambda, n);
        let (dt, ddt, dddt) = dtdx(x, tof, lambda);
        let delta = tof - tof_nd;
        let dt2 = dt * dt;
        let x_new = x
            - delta * (dt2 - delta * ddt / 2.0)
                / (dt * (dt2 - delta * ddt) + dddt * delta * delta / 6.0);
        err = (x - x_new).abs();
        x = x_new;
        iterations += 1;
    }

    let converged = err <= tol;
    if !converged {
        debug!(n, x, err, iterations, "Householder iterations exhausted their budget");
    }

    RootState {
        x,
        iterations,
        converged,
    }
}

/// Initial guess for the single zero-revolution root.
///
/// * `t00` - time of the minimum-energy transfer (x = 0)
/// * `t1` - time of the parabolic transfer (x = 1)
pub fn initial_guess_zero_rev(tof_nd: f64, lambda: f64, t00: f64, t1: f64) -> f64 {
    if tof_nd >= t00 {
        -(tof_nd - t00) / (tof_nd - t00 + 4.0)
    } else if tof_nd <= t1 {
        let lambda5 = lambda.powi(5);
        t1 * (t1 - tof_nd) / (2.0 / 5.0 * (1.0 - lambda5) * tof_nd) + 1.0
    } else {
        (tof_nd / t00).powf(LN_2 / (t1 / t00).ln()) - 1.0
    }
}

/// Initial guess for the left (low energy side) root with `n` revolutions.
pub fn initial_guess_left(tof_nd: f64, n: u32) -> f64 {
    let tmp = ((n as f64 * PI + PI) / (8.0 * tof_nd)).powf(2.0 / 3.0);
    (tmp - 1.0) / (tmp + 1.0)
}

/// Initial guess for the right root with `n` revolutions.
pub fn initial_guess_right(tof_nd: f64, n: u32) -> f64 {
    let tmp = ((8.0 * tof_nd) / (n as f64 * PI)).powf(2.0 / 3.0);
    (tmp - 1.0) / (tmp + 1.0)
}

/// Solve the zero-revolution branch.
pub fn solve_zero_rev(tof_nd: f64, lambda: f64, t00: f64, t1: f64) -> RootState {
    let x0 = initial_guess_zero_rev(tof_nd, lambda, t00, t1);
    trace!(x0, "zero-revolution initial guess");
    householder(tof_nd, x0, lambda, 0, ZERO_REV_TOL, MAX_ITERATIONS)
}

/// Solve the left and right branches with `n` revolutions.
pub fn solve_multi_rev(tof_nd: f64, lambda: f64, n: u32) -> (RootState, RootState) {
    let x_left = initial_guess_left(tof_nd, n);
    let x_right = initial_guess_right(tof_nd, n);
    trace!(n, x_left, x_right, "multi-revolution initial guesses");
    (
        householder(tof_nd, x_left, lambda, n, MULTI_REV_TOL, MAX_ITERATIONS),
        householder(tof_nd, x_right, lambda, n, MULTI_REV_TOL, MAX_ITERATIONS),
    )
}
