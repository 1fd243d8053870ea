//! Upper bound on the number of revolutions reachable in the given time.
//!
//! With `N` full revolutions the time of flight has a minimum over `x`. If the
//! requested time is shorter than that minimum, no `N`-revolution transfer
//! exists. The minimum is located with Halley's method on `dT/dx = 0`.

use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::tof::{dtdx, x2tof};

/// Step tolerance for the minimum-time search
const HALLEY_TOL: f64 = 1e-13;
/// The search stops once more than this many steps were taken
const HALLEY_MAX_STEPS: u32 = 12;

/// Locate the minimum time of flight for `n` revolutions.
///
/// Returns `(x_min, t_min, converged)`. The search starts at `x = 0`, where
/// the time of flight is `t00 + n * pi`.
pub fn minimum_time(lambda: f64, n: u32, t00: f64) -> (f64, f64, bool) {
    let mut t_min = t00 + n as f64 * PI;
    let mut x_old = 0.0;
    let mut x_new = 0.0;
    let mut steps = 0;

    let converged = loop {
        let (dt, ddt, dddt) = dtdx(x_old, t_min, lambda);
        if dt != 0.0 {
            x_new = x_old - dt * ddt / (ddt * ddt - dt * dddt / 2.0);
        }
        let err = (x_old - x_new).abs();
        if err < HALLEY_TOL {
            break true;
        }
        if steps > HALLEY_MAX_STEPS {
            break false;
        }
        t_min = x2tof(x_new, lambda, n);
        x_old = x_new;
        steps += 1;
    };

    if !converged {
        debug!(n, x_new, t_min, "minimum-time search did not converge, keeping last iterate");
    }
    (x_new, t_min, converged)
}

/// Maximum number of revolutions with a solution, capped at `max_revolutions`.
///
/// * `tof_nd` - non-dimensional time of flight
/// * `t00` - minimum-energy time of the zero-revolution transfer
pub fn max_feasible_revolutions(tof_nd: f64, lambda: f64, t00: f64, max_revolutions: u32) -> u32 {
    // `as` saturates, so an enormous time of flight cannot wrap around
    let mut n_max = ((tof_nd / PI) as u32).min(max_revolutions);

    if n_max > 0 {
        let t0 = t00 + n_max as f64 * PI;
        if tof_nd < t0 {
            let (_, t_min, _) = minimum_time(lambda, n_max, t00);
            if t_min > tof_nd {
                n_max -= 1;
            }
        }
    }

    trace!(tof_nd, n_max, "revolution bound");
    n_max.min(max_revolutions)
}
