//! Two-body propagator for test-only use.
//!
//! Elliptic states go through Kepler's equation in eccentric anomaly, which
//! stays well behaved over many revolutions. Hyperbolic and near-parabolic
//! states use the universal variable chi. Either way the Lagrange f and g
//! coefficients map (r0, v0) to the state after dt.

use std::f64::consts::{PI, TAU};

use super::{dot, norm};

/// Stumpff functions C(psi) and S(psi), with a series near psi = 0.
fn stumpff(psi: f64) -> (f64, f64) {
    if psi > 1e-6 {
        let s = psi.sqrt();
        ((1.0 - s.cos()) / psi, (s - s.sin()) / (psi * s))
    } else if psi < -1e-6 {
        let s = (-psi).sqrt();
        ((1.0 - s.cosh()) / psi, (s.sinh() - s) / (-psi * s))
    } else {
        (
            0.5 - psi / 24.0 + psi * psi / 720.0,
            1.0 / 6.0 - psi / 120.0 + psi * psi / 5040.0,
        )
    }
}

/// Radius reached at universal anomaly `chi`, which is also dt'(chi) * sqrt(mu).
fn radius_at(chi: f64, alpha: f64, r0: f64, sigma0: f64) -> f64 {
    let chi2 = chi * chi;
    let psi = alpha * chi2;
    let (c, s) = stumpff(psi);
    chi2 * c + sigma0 * chi * (1.0 - psi * s) + r0 * (1.0 - psi * c)
}

/// Propagate (r0, v0) by `dt` under two-body dynamics. Returns (r, v).
pub fn kepler_propagate(r0: &[f64; 3], v0: &[f64; 3], dt: f64, mu: f64) -> ([f64; 3], [f64; 3]) {
    let sqrt_mu = mu.sqrt();
    let r0_mag = norm(r0);
    // sigma0 = r0 . v0 / sqrt(mu)
    let sigma0 = dot(r0, v0) / sqrt_mu;
    // alpha = 1/a
    let alpha = 2.0 / r0_mag - dot(v0, v0) / mu;

    if alpha > 1e-12 {
        return propagate_elliptic(r0, v0, dt, mu, alpha);
    }

    let mut chi = if alpha < -1e-12 {
        let a = 1.0 / alpha;
        let sign = dt.signum();
        sign * (-a).sqrt()
            * ((-2.0 * mu * alpha * dt * dt)
                / (sigma0 * sqrt_mu + sign * (-mu * a).sqrt() * (1.0 - r0_mag * alpha)))
                .ln()
    } else {
        sqrt_mu * dt / r0_mag
    };

    let tol = 1e-14 * dt.abs().max(1.0);
    for _ in 0..50 {
        let chi2 = chi * chi;
        let psi = alpha * chi2;
        let (c, s) = stumpff(psi);
        let residual =
            r0_mag * chi * (1.0 - psi * s) + sigma0 * chi2 * c + chi2 * chi * s - sqrt_mu * dt;
        let step = residual / radius_at(chi, alpha, r0_mag, sigma0);
        chi -= step;
        if step.abs() < tol {
            break;
        }
    }

    let chi2 = chi * chi;
    let psi = alpha * chi2;
    let (c, s) = stumpff(psi);
    let r_mag = radius_at(chi, alpha, r0_mag, sigma0);

    let f = 1.0 - chi2 / r0_mag * c;
    let g = dt - chi2 * chi / sqrt_mu * s;
    let f_dot = sqrt_mu / (r_mag * r0_mag) * chi * (psi * s - 1.0);
    let g_dot = 1.0 - chi2 / r_mag * c;

    let mut r = [0.0; 3];
    let mut v = [0.0; 3];
    for i in 0..3 {
        r[i] = f * r0[i] + g * v0[i];
        v[i] = f_dot * r0[i] + g_dot * v0[i];
    }
    (r, v)
}

/// Elliptic propagation through the change in eccentric anomaly.
fn propagate_elliptic(
    r0: &[f64; 3],
    v0: &[f64; 3],
    dt: f64,
    mu: f64,
    alpha: f64,
) -> ([f64; 3], [f64; 3]) {
    let r0_mag = norm(r0);
    let a = 1.0 / alpha;
    let n = (mu * alpha * alpha * alpha).sqrt();

    // e cos E0 and e sin E0 from the state
    let ec = 1.0 - r0_mag * alpha;
    let es = dot(r0, v0) / (mu * a).sqrt();
    let e = ec.hypot(es);
    let e0 = es.atan2(ec);

    // Whole periods change nothing
    let dt = dt.rem_euclid(TAU / n);
    let m1 = e0 - es + n * dt;
    let turns = (m1 / TAU).floor();
    let m = m1 - turns * TAU;

    // Newton on E - e sin E = M, started at pi
    let mut ecc_anom = PI;
    for _ in 0..50 {
        let step = (ecc_anom - e * ecc_anom.sin() - m) / (1.0 - e * ecc_anom.cos());
        ecc_anom -= step;
        if step.abs() < 1e-15 {
            break;
        }
    }
    let de = ecc_anom + turns * TAU - e0;

    let f = 1.0 - a / r0_mag * (1.0 - de.cos());
    let g = dt - (de - de.sin()) / n;
    let mut r = [0.0; 3];
    for i in 0..3 {
        r[i] = f * r0[i] + g * v0[i];
    }
    let r_mag = norm(&r);
    let f_dot = -(mu * a).sqrt() / (r_mag * r0_mag) * de.sin();
    let g_dot = 1.0 - a / r_mag * (1.0 - de.cos());

    let mut v = [0.0; 3];
    for i in 0..3 {
        v[i] = f_dot * r0[i] + g_dot * v0[i];
    }
    (r, v)
}
