//! # Lambert Problem
//!
//! A Rust implementation of Izzo's Lambert solver, returning every
//! zero- and multi-revolution solution that fits the requested time of flight.
//!
//! The problem is recast in the non-dimensional variables `lambda` (transfer
//! geometry) and `x` (a universal orbit parameter). For each revolution count
//! `T(x) = T*` is solved with a fourth-order Householder iteration, and the
//! velocities are rebuilt in closed form.
//!
//! ## References
//!
//! 1. Izzo, D., "Revisiting Lambert's Problem," Celestial Mechanics and
//!    Dynamical Astronomy, Vol. 121, No. 1, 2015, pp. 1–15,
//!    <https://doi.org/10.1007/s10569-014-9587-y>
//!
//! 2. Battin, R. H., "An Introduction to the Mathematics and Methods of
//!    Astrodynamics," AIAA Education Series, 1999.
//!
//! ## Example
//!
//! ```rust
//! use lambert_problem::{solve_lambert, Direction};
//!
//! let r1 = [1.0, 0.0, 0.0];        // Initial position (DU)
//! let r2 = [0.0, 1.0, 0.0];        // Final position (DU)
//! let tof = 30.0;                   // Time of flight (TU), room for several revolutions
//! let mu = 1.0;                     // Gravitational parameter
//!
//! let lp = solve_lambert(&r1, &r2, tof, mu, Direction::Prograde, 100).unwrap();
//!
//! for (branch, v1) in lp.branches().zip(lp.v1()) {
//!     println!("{:?}: v1 = {:?}", branch, v1);
//! }
//! println!("{}", lp);
//! ```

mod geometry;
mod householder;
mod hypergeometric;
mod revolutions;
mod solver;
mod tof;
mod vector;
mod velocity;

pub use geometry::{Direction, TransferGeometry};
pub use householder::{householder, RootState};
pub use hypergeometric::hypergeometric_f;
pub use revolutions::{max_feasible_revolutions, minimum_time};
pub use solver::{solve_lambert, Branch, BranchSide, LambertError, LambertProblem};
pub use tof::{dtdx, x2tof, TofRegime};
