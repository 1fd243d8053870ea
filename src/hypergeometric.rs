//! Hypergeometric series used by the near-parabolic time-of-flight expression.
//!
//! Battin's formulation needs `F(3, 1; 5/2; z)`, evaluated here as a plain
//! power series. The series converges for `|z| < 1`, which the caller's regime
//! boundary guarantees. Outside that range the term cap ends the loop.

use tracing::warn;

/// Upper bound on the number of series terms.
pub const MAX_SERIES_TERMS: usize = 10_000;

/// Sum `F(3, 1; 5/2; z) = Σ C_j` with `C_0 = 1` and
/// `C_{j+1} = C_j (3 + j)(1 + j) / (2.5 + j) · z / (j + 1)`.
///
/// Terms are accumulated until the magnitude of the newest term drops to
/// `tol` or below.
pub fn hypergeometric_f(z: f64, tol: f64) -> f64 {
    let mut sum = 1.0;
    let mut term = 1.0;

    for j in 0..MAX_SERIES_TERMS {
        let jf = j as f64;
        term = term * (3.0 + jf) * (1.0 + jf) / (2.5 + jf) * z / (jf + 1.0);
        sum += term;
        if term.abs() <= tol {
            return sum;
        }
    }

    warn!(z, tol, last_term = term, "hypergeometric series hit its term cap");
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_argument_is_one() {
        assert_eq!(hypergeometric_f(0.0, 1e-11), 1.0);
    }

    #[test]
    fn test_leading_terms_small_z() {
        // F(3,1;5/2;z) = 1 + 6/5 z + 48/35 z^2 + ...
        let z = 1e-3;
        let expected = 1.0 + 1.2 * z + 48.0 / 35.0 * z * z;
        assert_relative_eq!(hypergeometric_f(z, 1e-16), expected, max_relative = 1e-8);
    }

    #[test]
    fn test_matches_long_partial_sum() {
        let z = -0.4;
        let mut sum = 0.0;
        let mut c = 1.0;
        for j in 0..400 {
            sum += c;
            let jf = j as f64;
            c *= (3.0 + jf) * (1.0 + jf) / (2.5 + jf) * z / (jf + 1.0);
        }
        assert_relative_eq!(hypergeometric_f(z, 1e-15), sum, max_relative = 1e-12);
    }

    #[test]
    fn test_divergent_argument_terminates() {
        let value = hypergeometric_f(1.5, 1e-11);
        assert!(value > 1.0);
    }
}
