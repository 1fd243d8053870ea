//! Velocity reconstruction from the solved x variable.
//!
//! Once a root x has been found, the radial and tangential velocity
//! components at both ends follow in closed form; the Cartesian vectors are
//! recombined from the transfer-plane basis of [`TransferGeometry`].

use crate::geometry::TransferGeometry;
use crate::vector::combine;

/// Radial and tangential speeds at departure and arrival.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalComponents {
    pub vr1: f64,
    pub vt1: f64,
    pub vr2: f64,
    pub vt2: f64,
}

/// Compute the radial/tangential velocity components for one root.
///
/// # Arguments
/// * `x` - Solved x variable
/// * `geom` - The problem geometry
/// * `mu` - Gravitational parameter
pub fn terminal_components(x: f64, geom: &TransferGeometry, mu: f64) -> TerminalComponents {
    let lambda = geom.lambda;
    let lambda2 = lambda * lambda;

    let gamma = (mu * geom.semi_perimeter / 2.0).sqrt();
    let rho = (geom.r1 - geom.r2) / geom.chord;
    let sigma = (1.0 - rho * rho).sqrt();

    let y = (1.0 - lambda2 + lambda2 * x * x).sqrt();
    let vr1 = gamma * ((lambda * y - x) - rho * (lambda * y + x)) / geom.r1;
    let vr2 = -gamma * ((lambda * y - x) + rho * (lambda * y + x)) / geom.r2;
    let vt = gamma * sigma * (y + lambda * x);

    TerminalComponents {
        vr1,
        vt1: vt / geom.r1,
        vr2,
        vt2: vt / geom.r2,
    }
}

/// Compute terminal velocity vectors for one root.
///
/// - v1 = vr1 * ir1 + vt1 * it1
/// - v2 = vr2 * ir2 + vt2 * it2
///
/// # Returns
/// Tuple of (v1, v2) velocity vectors
pub fn compute_velocities(x: f64, geom: &TransferGeometry, mu: f64) -> ([f64; 3], [f64; 3]) {
    let c = terminal_components(x, geom, mu);
    let v1 = combine(c.vr1, &geom.ir1, c.vt1, &geom.it1);
    let v2 = combine(c.vr2, &geom.ir2, c.vt2, &geom.it2);
    (v1, v2)
}

/// Semi-major axis of the transfer orbit for a given x (negative for hyperbolas).
#[inline]
pub fn semi_major_axis(x: f64, geom: &TransferGeometry) -> f64 {
    geom.semi_perimeter / 2.0 / (1.0 - x * x)
}
