//! Geometry of the Lambert problem in Izzo's non-dimensional formulation.
//!
//! This module handles the geometric preprocessing: chord, semi-perimeter,
//! the shape parameter lambda, the non-dimensional time of flight and the
//! radial/tangential unit vectors at both ends of the transfer.

use crate::solver::LambertError;
use crate::vector::{cross, norm, scale, sub};

/// Transfer direction (prograde or retrograde)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Counter-clockwise as seen from +z
    #[default]
    Prograde,
    /// Clockwise as seen from +z
    Retrograde,
}

impl Direction {
    /// Map a `retrograde` flag to a direction.
    #[inline]
    pub fn from_retrograde(retrograde: bool) -> Self {
        if retrograde {
            Direction::Retrograde
        } else {
            Direction::Prograde
        }
    }
}

/// Geometric parameters computed from the boundary conditions.
///
/// These are computed once at construction and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferGeometry {
    /// Magnitude of r1
    pub r1: f64,
    /// Magnitude of r2
    pub r2: f64,
    /// Chord |r2 - r1|
    pub chord: f64,
    /// Semi-perimeter (c + |r1| + |r2|) / 2
    pub semi_perimeter: f64,
    /// Shape parameter, sign carries the transfer-angle and direction conventions
    pub lambda: f64,
    /// Non-dimensional time of flight
    pub tof_nd: f64,
    /// Unit normal of the plane spanned by r1 and r2
    pub ih: [f64; 3],
    /// Radial unit vector at departure
    pub ir1: [f64; 3],
    /// Tangential unit vector at departure
    pub it1: [f64; 3],
    /// Radial unit vector at arrival
    pub ir2: [f64; 3],
    /// Tangential unit vector at arrival
    pub it2: [f64; 3],
}

impl TransferGeometry {
    /// Compute the transfer geometry from the problem inputs.
    ///
    /// # Arguments
    /// * `r1_vec` - Initial position vector [x, y, z]
    /// * `r2_vec` - Final position vector [x, y, z]
    /// * `tof` - Time of flight, must be > 0
    /// * `mu` - Gravitational parameter, must be > 0
    /// * `direction` - Transfer direction (prograde or retrograde)
    ///
    /// # Errors
    /// Non-positive `tof` or `mu`, or a transfer plane whose normal has no z
    /// component (the direction of motion cannot be inferred from it).
    pub fn new(
        r1_vec: &[f64; 3],
        r2_vec: &[f64; 3],
        tof: f64,
        mu: f64,
        direction: Direction,
    ) -> Result<Self, LambertError> {
        if !tof.is_finite() || tof <= 0.0 {
            return Err(LambertError::InvalidTimeOfFlight(tof));
        }
        if !mu.is_finite() || mu <= 0.0 {
            return Err(LambertError::InvalidGravitationalParameter(mu));
        }

        let chord = norm(&sub(r2_vec, r1_vec));
        let r1 = norm(r1_vec);
        let r2 = norm(r2_vec);
        let semi_perimeter = (chord + r1 + r2) / 2.0;

        let ir1 = scale(r1_vec, 1.0 / r1);
        let ir2 = scale(r2_vec, 1.0 / r2);
        let h = cross(&ir1, &ir2);
        let h_mag = norm(&h);
        // Collinear or zero-length positions leave the plane undefined
        if h_mag == 0.0 || !h_mag.is_finite() {
            return Err(LambertError::DegenerateTransferPlane);
        }
        let ih = scale(&h, 1.0 / h_mag);
        if ih[2] == 0.0 {
            return Err(LambertError::DegenerateTransferPlane);
        }

        let lambda2 = 1.0 - chord / semi_perimeter;
        let mut lambda = lambda2.sqrt();

        let t1 = cross(&ih, &ir1);
        let t2 = cross(&ih, &ir2);
        let mut it1 = scale(&t1, 1.0 / norm(&t1));
        let mut it2 = scale(&t2, 1.0 / norm(&t2));

        // Transfer angle larger than 180 degrees as seen from above the z axis
        if ih[2] < 0.0 {
            lambda = -lambda;
            it1 = scale(&it1, -1.0);
            it2 = scale(&it2, -1.0);
        }
        if direction == Direction::Retrograde {
            lambda = -lambda;
            it1 = scale(&it1, -1.0);
            it2 = scale(&it2, -1.0);
        }

        let tof_nd = (2.0 * mu / semi_perimeter.powi(3)).sqrt() * tof;

        Ok(Self {
            r1,
            r2,
            chord,
            semi_perimeter,
            lambda,
            tof_nd,
            ih,
            ir1,
            it1,
            ir2,
            it2,
        })
    }

    /// Non-dimensional time of the zero-revolution minimum-energy transfer (x = 0).
    #[inline]
    pub fn t00(&self) -> f64 {
        let l = self.lambda;
        l.acos() + l * (1.0 - l * l).sqrt()
    }

    /// Non-dimensional time of the parabolic transfer (x = 1).
    #[inline]
    pub fn t_parabolic(&self) -> f64 {
        2.0 / 3.0 * (1.0 - self.lambda.powi(3))
    }
}
