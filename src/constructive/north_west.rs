//! North-West Corner rule.
//!
//! Sweeps the allocation matrix from the top-left cell, shipping as much as
//! possible on the current cell and then moving down (source exhausted) or
//! right (sink exhausted). Costs are never consulted when choosing cells.
//!
//! # Complexity
//!
//! O(d + r): at most `d + r - 1` steps.
//!
//! # Reference
//!
//! The cheapest baseline for the transportation problem; solution quality is
//! usually well above what cost-aware rules reach.

use std::time::Instant;

use tracing::debug;

use super::remaining::Remaining;
use crate::error::SolveResult;
use crate::models::{Allocation, Instance, SolverResult};
use crate::solver::{check_preconditions, Method};

/// Builds an allocation with the North-West Corner rule.
///
/// Fixed costs are ignored: the rule ships on positions only, and the total
/// cost is the transport cost of the swept cells. Degenerate steps that ship
/// zero units (source and sink exhausted together) are still counted.
///
/// # Errors
///
/// Returns a precondition error if the instance is malformed or unbalanced.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::models::Instance;
/// use u_transport::constructive::north_west_corner;
///
/// let cost = CostMatrix::from_rows(vec![vec![4.0, 6.0], vec![5.0, 3.0]]).unwrap();
/// let instance = Instance::new("tiny", vec![10, 15], vec![12, 13], cost);
///
/// let (allocation, result) = north_west_corner(&instance).unwrap();
/// assert!(result.feasible);
/// assert_eq!(allocation.get(0, 0), 10);
/// assert_eq!(allocation.get(1, 0), 2);
/// assert_eq!(allocation.get(1, 1), 13);
/// assert_eq!(result.cost, 40.0 + 10.0 + 39.0);
/// ```
pub fn north_west_corner(instance: &Instance) -> SolveResult<(Allocation, SolverResult)> {
    check_preconditions(instance, Method::NorthWestCorner)?;
    Ok(sweep(instance, Remaining::from_instance(instance)))
}

fn sweep(instance: &Instance, mut remaining: Remaining) -> (Allocation, SolverResult) {
    let started = Instant::now();
    let cost = instance.cost();
    let (d, r) = (remaining.supply().len(), remaining.demand().len());
    let mut allocation = Allocation::new(d, r);
    let (mut i, mut j) = (0, 0);
    let mut iterations = 0;

    while i < d && j < r {
        iterations += 1;
        let amount = remaining.ship(i, j);
        allocation.allocate(i, j, amount, cost.get(i, j));
        debug!(source = i, sink = j, amount, "north-west corner step");

        if remaining.supply()[i] == 0 {
            i += 1;
        } else if remaining.demand()[j] == 0 {
            j += 1;
        }
    }

    remaining.conclude(Method::NorthWestCorner, allocation, iterations, started)
}
