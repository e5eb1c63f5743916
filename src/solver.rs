//! Solver selection.
//!
//! The three heuristics share one entry-point shape. [`Method`] picks one at
//! the call site; [`Solver`] is the same capability as a trait for code that
//! wants to hold a solver value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constructive::{minimum_cost, north_west_corner, vogel};
use crate::error::{PreconditionError, SolveResult};
use crate::models::{Allocation, FixedCostShape, Instance, SolverResult};

/// A transportation heuristic.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::models::Instance;
/// use u_transport::solver::Method;
///
/// let cost = CostMatrix::from_rows(vec![vec![4.0, 6.0], vec![5.0, 3.0]]).unwrap();
/// let instance = Instance::new("tiny", vec![10, 15], vec![12, 13], cost);
///
/// for method in Method::ALL {
///     let (_, result) = method.solve(&instance).unwrap();
///     assert!(result.feasible);
///     assert_eq!(result.method, method);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// North-West Corner rule.
    NorthWestCorner,
    /// Minimum-Cost (least-cost matrix) method.
    MinimumCost,
    /// Vogel's Approximation Method.
    Vogel,
}

impl Method {
    /// All methods, cheapest first.
    pub const ALL: [Method; 3] = [Method::NorthWestCorner, Method::MinimumCost, Method::Vogel];

    /// Returns `true` if this method can solve instances with the given
    /// fixed-cost layout.
    pub fn accepts(self, shape: FixedCostShape) -> bool {
        match self {
            Method::NorthWestCorner => true,
            Method::MinimumCost => matches!(shape, FixedCostShape::None | FixedCostShape::PerRoute),
            Method::Vogel => matches!(shape, FixedCostShape::None | FixedCostShape::PerSource),
        }
    }

    /// Runs this method on `instance`.
    pub fn solve(self, instance: &Instance) -> SolveResult<(Allocation, SolverResult)> {
        match self {
            Method::NorthWestCorner => north_west_corner(instance),
            Method::MinimumCost => minimum_cost(instance),
            Method::Vogel => vogel(instance),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::NorthWestCorner => "north_west_corner",
            Method::MinimumCost => "minimum_cost",
            Method::Vogel => "vogel",
        };
        f.write_str(name)
    }
}

/// A stateless transportation solver.
pub trait Solver: Send + Sync {
    /// The heuristic this solver runs.
    fn method(&self) -> Method;

    /// Solves `instance`, returning the allocation and its summary.
    fn solve(&self, instance: &Instance) -> SolveResult<(Allocation, SolverResult)> {
        self.method().solve(instance)
    }
}

/// [`Solver`] running the North-West Corner rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct NorthWestCornerSolver;

/// [`Solver`] running the Minimum-Cost method.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumCostSolver;

/// [`Solver`] running Vogel's Approximation Method.
#[derive(Debug, Clone, Copy, Default)]
pub struct VogelSolver;

impl Solver for NorthWestCornerSolver {
    fn method(&self) -> Method {
        Method::NorthWestCorner
    }
}

impl Solver for MinimumCostSolver {
    fn method(&self) -> Method {
        Method::MinimumCost
    }
}

impl Solver for VogelSolver {
    fn method(&self) -> Method {
        Method::Vogel
    }
}

impl Solver for Method {
    fn method(&self) -> Method {
        *self
    }
}

/// Validates `instance` and its fixed-cost layout for `method`.
pub(crate) fn check_preconditions(
    instance: &Instance,
    method: Method,
) -> Result<(), PreconditionError> {
    instance.validate()?;
    let shape = instance.fixed_cost().shape();
    if !method.accepts(shape) {
        return Err(PreconditionError::FixedCostShape { method, shape });
    }
    Ok(())
}
