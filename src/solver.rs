//! Lambert solver main module.
//!
//! [`LambertProblem`] solves the problem once at construction: geometry,
//! revolution bound, one Householder search per branch, then velocity
//! reconstruction. Everything is read back through accessors.

use std::f64::consts::PI;
use std::fmt;

use thiserror::Error;
use tracing::trace;

use crate::geometry::{Direction, TransferGeometry};
use crate::householder::{solve_multi_rev, solve_zero_rev, RootState};
use crate::revolutions::max_feasible_revolutions;
use crate::velocity::{compute_velocities, semi_major_axis};

/// Error types for the Lambert solver
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LambertError {
    /// Time of flight is non-positive or not finite
    #[error("time of flight must be positive, got {0}")]
    InvalidTimeOfFlight(f64),
    /// Gravitational parameter is non-positive or not finite
    #[error("gravitational parameter must be positive, got {0}")]
    InvalidGravitationalParameter(f64),
    /// The transfer plane normal has no z component, or does not exist
    #[error(
        "the angular momentum vector has no z component, \
         impossible to tell clockwise from counter-clockwise"
    )]
    DegenerateTransferPlane,
}

/// Which of the two solutions of a multi-revolution pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BranchSide {
    /// The only zero-revolution solution
    Single,
    /// Left branch (x below the minimum-time point)
    Left,
    /// Right branch (x above the minimum-time point)
    Right,
}

/// Position of one solution in the output sequences.
///
/// Solutions are ordered `N = 0`, then left and right for `N = 1..=Nmax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Branch {
    pub revolutions: u32,
    pub side: BranchSide,
}

impl Branch {
    /// Branch stored at `index`.
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            return Branch {
                revolutions: 0,
                side: BranchSide::Single,
            };
        }
        let revolutions = index.div_ceil(2) as u32;
        let side = if index % 2 == 1 {
            BranchSide::Left
        } else {
            BranchSide::Right
        };
        Branch { revolutions, side }
    }

    /// Index of this branch in the output sequences.
    pub fn index(self) -> usize {
        match self.side {
            BranchSide::Single => 0,
            BranchSide::Left => 2 * self.revolutions as usize - 1,
            BranchSide::Right => 2 * self.revolutions as usize,
        }
    }
}

/// A solved Lambert problem with all `2 * Nmax + 1` solutions.
#[derive(Debug, Clone)]
pub struct LambertProblem {
    r1: [f64; 3],
    r2: [f64; 3],
    tof: f64,
    mu: f64,
    geometry: TransferGeometry,
    n_max: u32,
    x: Vec<f64>,
    iters: Vec<u32>,
    converged: Vec<bool>,
    v1: Vec<[f64; 3]>,
    v2: Vec<[f64; 3]>,
}

impl LambertProblem {
    /// Solve the Lambert problem for every revolution count up to `max_revolutions`.
    ///
    /// # Arguments
    /// * `r1` - Initial position vector [x, y, z]
    /// * `r2` - Final position vector [x, y, z]
    /// * `tof` - Time of flight (must be > 0)
    /// * `mu` - Gravitational parameter (must be > 0)
    /// * `direction` - Transfer direction (Prograde or Retrograde)
    /// * `max_revolutions` - Largest number of full revolutions to consider
    ///
    /// # Errors
    /// See [`LambertError`]. Iteration budgets running out is not an error;
    /// check [`LambertProblem::converged`] if it matters.
    ///
    /// # Example
    /// ```
    /// use lambert_problem::{Direction, LambertProblem};
    ///
    /// let lp = LambertProblem::new(
    ///     &[1.0, 0.0, 0.0],
    ///     &[0.0, 1.0, 0.0],
    ///     30.0,
    ///     1.0,
    ///     Direction::Prograde,
    ///     3,
    /// )
    /// .unwrap();
    /// assert_eq!(lp.v1().len(), 2 * lp.n_max() as usize + 1);
    /// ```
    pub fn new(
        r1: &[f64; 3],
        r2: &[f64; 3],
        tof: f64,
        mu: f64,
        direction: Direction,
        max_revolutions: u32,
    ) -> Result<Self, LambertError> {
        let geometry = TransferGeometry::new(r1, r2, tof, mu, direction)?;
        let lambda = geometry.lambda;
        let tof_nd = geometry.tof_nd;
        let t00 = geometry.t00();
        let t1 = geometry.t_parabolic();

        let n_max = max_feasible_revolutions(tof_nd, lambda, t00, max_revolutions);

        let count = 2 * n_max as usize + 1;
        let mut roots: Vec<RootState> = Vec::with_capacity(count);
        roots.push(solve_zero_rev(tof_nd, lambda, t00, t1));
        for n in 1..=n_max {
            let (left, right) = solve_multi_rev(tof_nd, lambda, n);
            roots.push(left);
            roots.push(right);
        }

        let mut v1 = Vec::with_capacity(count);
        let mut v2 = Vec::with_capacity(count);
        for root in &roots {
            let (v_dep, v_arr) = compute_velocities(root.x, &geometry, mu);
            v1.push(v_dep);
            v2.push(v_arr);
        }

        trace!(
            lambda,
            tof_nd,
            n_max,
            iters = ?roots.iter().map(|r| r.iterations).collect::<Vec<_>>(),
            "Lambert problem solved"
        );

        Ok(Self {
            r1: *r1,
            r2: *r2,
            tof,
            mu,
            geometry,
            n_max,
            x: roots.iter().map(|r| r.x).collect(),
            iters: roots.iter().map(|r| r.iterations).collect(),
            converged: roots.iter().map(|r| r.converged).collect(),
            v1,
            v2,
        })
    }

    pub fn r1(&self) -> &[f64; 3] {
        &self.r1
    }

    pub fn r2(&self) -> &[f64; 3] {
        &self.r2
    }

    pub fn tof(&self) -> f64 {
        self.tof
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Largest revolution count with a solution. There are `2 * Nmax + 1` solutions.
    pub fn n_max(&self) -> u32 {
        self.n_max
    }

    /// Number of solutions, `2 * Nmax + 1`.
    pub fn solution_count(&self) -> usize {
        self.x.len()
    }

    /// The x variable of each solution (0 revs, 1 left, 1 right, 2 left, ...).
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Velocities at r1 for all solutions.
    pub fn v1(&self) -> &[[f64; 3]] {
        &self.v1
    }

    /// Velocities at r2 for all solutions.
    pub fn v2(&self) -> &[[f64; 3]] {
        &self.v2
    }

    /// Householder iterations spent on each solution.
    pub fn iters(&self) -> &[u32] {
        &self.iters
    }

    /// Whether each solution met its step tolerance within the iteration budget.
    pub fn converged(&self) -> &[bool] {
        &self.converged
    }

    pub fn geometry(&self) -> &TransferGeometry {
        &self.geometry
    }

    /// Branch labels in output order.
    pub fn branches(&self) -> impl Iterator<Item = Branch> + '_ {
        (0..self.x.len()).map(Branch::from_index)
    }

    /// Semi-major axis of solution `index`, negative for hyperbolic transfers.
    ///
    /// # Panics
    /// If `index >= self.solution_count()`.
    pub fn semi_major_axis(&self, index: usize) -> f64 {
        semi_major_axis(self.x[index], &self.geometry)
    }
}

impl Default for LambertProblem {
    /// Quarter of the unit circular orbit: r1 = (1,0,0), r2 = (0,1,0), tof = pi/2, mu = 1.
    fn default() -> Self {
        Self::new(
            &[1.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0],
            PI / 2.0,
            1.0,
            Direction::Prograde,
            0,
        )
        .expect("reference transfer has valid inputs")
    }
}

fn fmt_vec(v: &[f64; 3]) -> String {
    format!("[{}, {}, {}]", v[0], v[1], v[2])
}

impl fmt::Display for LambertProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.geometry;
        writeln!(f, "Lambert's problem:")?;
        writeln!(f, "mu = {}", self.mu)?;
        writeln!(f, "r1 = {}", fmt_vec(&self.r1))?;
        writeln!(f, "r2 = {}", fmt_vec(&self.r2))?;
        writeln!(f, "Time of flight: {}", self.tof)?;
        writeln!(f)?;
        writeln!(f, "chord = {}", g.chord)?;
        writeln!(f, "semiperimeter = {}", g.semi_perimeter)?;
        writeln!(f, "lambda = {}", g.lambda)?;
        writeln!(f, "non dimensional time of flight = {}", g.tof_nd)?;
        writeln!(f)?;
        writeln!(f, "Maximum number of revolutions: {}", self.n_max)?;
        writeln!(f, "Solutions:")?;
        for (i, branch) in self.branches().enumerate() {
            let label = match branch.side {
                BranchSide::Single => "0 revs".to_string(),
                BranchSide::Left => format!("{} revs,  left", branch.revolutions),
                BranchSide::Right => format!("{} revs, right", branch.revolutions),
            };
            writeln!(
                f,
                "{}. Iters: {}, x: {}, a: {}",
                label,
                self.iters[i],
                self.x[i],
                self.semi_major_axis(i)
            )?;
            writeln!(f, "\tv1 = {} v2 = {}", fmt_vec(&self.v1[i]), fmt_vec(&self.v2[i]))?;
        }
        Ok(())
    }
}

/// Solve the Lambert problem; shorthand for [`LambertProblem::new`].
///
/// # Example
/// ```
/// use lambert_problem::{solve_lambert, Direction};
///
/// let r1 = [1.0, 0.0, 0.0];
/// let r2 = [0.0, 1.0, 0.0];
/// let tof = std::f64::consts::PI / 2.0;
///
/// let lp = solve_lambert(&r1, &r2, tof, 1.0, Direction::Prograde, 0).unwrap();
/// assert!((lp.v1()[0][1] - 1.0).abs() < 1e-12);
/// ```
pub fn solve_lambert(
    r1: &[f64; 3],
    r2: &[f64; 3],
    tof: f64,
    mu: f64,
    direction: Direction,
    max_revolutions: u32,
) -> Result<LambertProblem, LambertError> {
    LambertProblem::new(r1, r2, tof, mu, direction, max_revolutions)
}
