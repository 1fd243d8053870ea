//! Non-dimensional time of flight as a function of the universal x variable.
//!
//! Three closed-form expressions cover the whole range of `x`, each chosen
//! where it is numerically well conditioned:
//!
//! | Regime    | Condition               | Expression                         |
//! |-----------|-------------------------|------------------------------------|
//! | Battin    | `\|x - 1\| <= 0.01`       | hypergeometric series              |
//! | Lagrange  | `0.01 < \|x - 1\| < 0.2`  | inverse trig / hyperbolic, `a`     |
//! | Lancaster | `\|x - 1\| >= 0.2`        | `acos` / `ln` on `E = x^2 - 1`     |
//!
//! The derivatives returned by [`dtdx`] do not depend on the regime.

use std::f64::consts::PI;

use crate::hypergeometric::hypergeometric_f;

/// Upper edge of the Battin band around the parabola.
pub const BATTIN_BAND: f64 = 0.01;
/// Upper edge of the Lagrange band around the parabola.
pub const LAGRANGE_BAND: f64 = 0.2;
/// Stopping tolerance for the hypergeometric series.
const SERIES_TOL: f64 = 1e-11;

/// Which time-of-flight expression is used for a given `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TofRegime {
    Battin,
    Lagrange,
    Lancaster,
}

impl TofRegime {
    /// Select the regime from the distance of `x` to the parabolic value 1.
    #[inline]
    pub fn select(x: f64) -> Self {
        let dist = (x - 1.0).abs();
        if dist <= BATTIN_BAND {
            TofRegime::Battin
        } else if dist < LAGRANGE_BAND {
            TofRegime::Lagrange
        } else {
            TofRegime::Lancaster
        }
    }

    /// Evaluate this regime's expression.
    #[inline]
    pub fn eval(self, x: f64, lambda: f64, n: u32) -> f64 {
        match self {
            TofRegime::Battin => battin_tof(x, lambda, n),
            TofRegime::Lagrange => lagrange_tof(x, lambda, n),
            TofRegime::Lancaster => lancaster_tof(x, lambda, n),
        }
    }
}

/// Non-dimensional time of flight `T(x, N)` for shape parameter `lambda`.
#[inline]
pub fn x2tof(x: f64, lambda: f64, n: u32) -> f64 {
    TofRegime::select(x).eval(x, lambda, n)
}

/// Lagrange's expression in terms of the non-dimensional semi-major axis
/// `a = 1 / (1 - x^2)`.
pub fn lagrange_tof(x: f64, lambda: f64, n: u32) -> f64 {
    let a = 1.0 / (1.0 - x * x);
    if a > 0.0 {
        let alfa = 2.0 * x.acos();
        let mut beta = 2.0 * (lambda * lambda / a).sqrt().asin();
        if lambda < 0.0 {
            beta = -beta;
        }
        a * a.sqrt() * ((alfa - alfa.sin()) - (beta - beta.sin()) + 2.0 * PI * n as f64) / 2.0
    } else {
        let alfa = 2.0 * x.acosh();
        let mut beta = 2.0 * (-lambda * lambda / a).sqrt().asinh();
        if lambda < 0.0 {
            beta = -beta;
        }
        -a * (-a).sqrt() * ((beta - beta.sinh()) - (alfa - alfa.sinh())) / 2.0
    }
}

/// Battin's near-parabolic expression.
pub fn battin_tof(x: f64, lambda: f64, n: u32) -> f64 {
    let e = x * x - 1.0;
    let rho = e.abs();
    let z = (1.0 + lambda * lambda * e).sqrt();
    let eta = z - lambda * x;
    let s1 = 0.5 * (1.0 - lambda - x * eta);
    let q = 4.0 / 3.0 * hypergeometric_f(s1, SERIES_TOL);
    let mut tof = (eta * eta * eta * q + 4.0 * lambda * eta) / 2.0;
    if n > 0 {
        tof += n as f64 * PI / rho.powf(1.5);
    }
    tof
}

/// Lancaster's expression, elliptic or hyperbolic by the sign of `x^2 - 1`.
pub fn lancaster_tof(x: f64, lambda: f64, n: u32) -> f64 {
    let e = x * x - 1.0;
    let z = (1.0 + lambda * lambda * e).sqrt();
    let y = e.abs().sqrt();
    let g = x * z - lambda * e;
    let d = if e < 0.0 {
        n as f64 * PI + g.acos()
    } else {
        let f = y * (z - lambda * x);
        (f + g).ln()
    };
    (x - lambda * z - d / y) / e
}

/// First three derivatives of the time of flight with respect to `x`.
///
/// `tof` must be the value of `T(x, N)` at the same `x`; the multi-revolution
/// count enters only through it.
#[inline]
pub fn dtdx(x: f64, tof: f64, lambda: f64) -> (f64, f64, f64) {
    let l2 = lambda * lambda;
    let l3 = l2 * lambda;
    let umx2 = 1.0 - x * x;
    let y = (1.0 - l2 * umx2).sqrt();
    let y2 = y * y;
    let y3 = y2 * y;
    let dt = 1.0 / umx2 * (3.0 * tof * x - 2.0 + 2.0 * l3 * x / y);
    let ddt = 1.0 / umx2 * (3.0 * tof + 5.0 * x * dt + 2.0 * (1.0 - l2) * l3 / y3);
    let dddt = 1.0 / umx2
        * (7.0 * x * ddt + 8.0 * dt - 6.0 * (1.0 - l2) * l2 * l3 * x / y3 / y2);
    (dt, ddt, dddt)
}
