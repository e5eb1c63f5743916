//! Minimum-Cost (least-cost matrix) method.
//!
//! Repeatedly picks the globally cheapest route that still has both supply
//! and demand, ships as much as possible on it, and repeats until all demand
//! is met.
//!
//! # Complexity
//!
//! O((d + r) · d · r): at most `d + r - 1` steps, each a full matrix scan.

use std::time::Instant;

use tracing::debug;

use super::remaining::Remaining;
use crate::cost::CostMatrix;
use crate::error::{AllocationError, SolveResult};
use crate::models::{Allocation, FixedCost, Instance, SolverResult};
use crate::solver::{check_preconditions, Method};

/// Builds an allocation with the Minimum-Cost method.
///
/// Ties between equally cheap routes go to the first one in row-major order.
/// When the instance carries per-route fixed costs, the route's fixed cost is
/// added every time that route receives an allocation step.
///
/// # Errors
///
/// Returns a precondition error for malformed or unbalanced instances, or
/// for per-source fixed costs; returns an allocation error if demand remains
/// with no eligible route.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::models::Instance;
/// use u_transport::constructive::minimum_cost;
///
/// let cost = CostMatrix::from_rows(vec![vec![4.0, 6.0], vec![5.0, 3.0]]).unwrap();
/// let instance = Instance::new("tiny", vec![10, 15], vec![12, 13], cost);
///
/// let (allocation, result) = minimum_cost(&instance).unwrap();
/// assert!(result.feasible);
/// assert_eq!(allocation.get(1, 1), 13);
/// assert_eq!(allocation.get(0, 0), 10);
/// assert_eq!(allocation.get(1, 0), 2);
/// ```
pub fn minimum_cost(instance: &Instance) -> SolveResult<(Allocation, SolverResult)> {
    check_preconditions(instance, Method::MinimumCost)?;
    Ok(greedy(instance, Remaining::from_instance(instance))?)
}

fn greedy(
    instance: &Instance,
    mut remaining: Remaining,
) -> Result<(Allocation, SolverResult), AllocationError> {
    let started = Instant::now();
    let cost = instance.cost();
    let route_fixed = match instance.fixed_cost() {
        FixedCost::PerRoute(fixed) => Some(fixed),
        _ => None,
    };
    let mut allocation = Allocation::new(remaining.supply().len(), remaining.demand().len());
    let mut iterations = 0;

    while remaining.has_demand() {
        iterations += 1;
        let (row, col) =
            cheapest_open_cell(cost, &remaining).ok_or_else(|| remaining.stuck(iterations))?;

        let amount = remaining.ship(row, col);
        allocation.allocate(row, col, amount, cost.get(row, col));
        if let Some(fixed) = route_fixed {
            allocation.add_fixed_cost(fixed.get(row, col));
        }
        debug!(source = row, sink = col, amount, "minimum-cost step");
    }

    Ok(remaining.conclude(Method::MinimumCost, allocation, iterations, started))
}

/// Cheapest route with open supply and open demand, scanning row-major.
fn cheapest_open_cell(cost: &CostMatrix, remaining: &Remaining) -> Option<(usize, usize)> {
    let open_sinks = remaining.open_sinks();
    let mut best: Option<(usize, usize, f64)> = None;

    for (row, _) in remaining
        .supply()
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s > 0)
    {
        for (col, &c) in cost.row(row).iter().enumerate() {
            if !open_sinks[col] {
                continue;
            }
            if best.map_or(true, |(_, _, b)| c < b) {
                best = Some((row, col, c));
            }
        }
    }

    best.map(|(row, col, _)| (row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::sample_instance;
    use crate::error::{PreconditionError, SolveError};
    use crate::models::FixedCostShape;

    #[test]
    fn test_minimum_cost_sample() {
        let (alloc, result) = minimum_cost(&sample_instance()).expect("solvable");
        assert!(result.feasible);
        assert_eq!(result.method, Method::MinimumCost);
        assert_eq!(result.iterations, 5);
        assert_eq!(
            alloc.to_rows(),
            vec![vec![0, 20, 0], vec![10, 0, 20], vec![0, 5, 20]]
        );
        // 20*6 + 10*9 + 5*9 + 20*13 + 20*16
        assert!((result.cost - 835.0).abs() < 1e-10);
    }

    #[test]
    fn test_minimum_cost_tie_takes_row_major_first() {
        let cost = CostMatrix::from_rows(vec![vec![5.0, 1.0], vec![1.0, 5.0]]).expect("valid");
        let inst = Instance::new("tie", vec![4, 4], vec![4, 4], cost);
        let (alloc, _) = minimum_cost(&inst).expect("solvable");
        let first = alloc.steps()[0];
        assert_eq!((first.source, first.sink), (0, 1));
        assert_eq!(alloc.get(1, 0), 4);
    }

    #[test]
    fn test_minimum_cost_charges_route_fixed_cost_per_step() {
        let cost = CostMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).expect("valid");
        let fixed =
            CostMatrix::from_rows(vec![vec![10.0, 20.0], vec![30.0, 40.0]]).expect("valid");
        let inst = Instance::new("fixed", vec![3, 2], vec![2, 3], cost)
            .with_fixed_cost(FixedCost::PerRoute(fixed));
        let (alloc, result) = minimum_cost(&inst).expect("solvable");
        // (0,0)=2, then (0,1)=1, then (1,1)=2
        assert_eq!(alloc.to_rows(), vec![vec![2, 1], vec![0, 2]]);
        let transport = 2.0 * 1.0 + 1.0 * 2.0 + 2.0 * 4.0;
        assert!((result.cost - (transport + 10.0 + 20.0 + 40.0)).abs() < 1e-10);
    }

    #[test]
    fn test_minimum_cost_rejects_per_source_fixed_cost() {
        let inst = sample_instance().with_fixed_cost(FixedCost::PerSource(vec![1.0; 3]));
        assert_eq!(
            minimum_cost(&inst).err(),
            Some(SolveError::Precondition(PreconditionError::FixedCostShape {
                method: Method::MinimumCost,
                shape: FixedCostShape::PerSource,
            }))
        );
    }

    #[test]
    fn test_minimum_cost_stuck_without_supply() {
        let cost = CostMatrix::from_data(2, 2, vec![1.0; 4]).expect("valid");
        let inst = Instance::new("short", vec![2, 2], vec![3, 3], cost);
        let err = greedy(&inst, Remaining::from_instance(&inst)).expect_err("stuck");
        assert_eq!(
            err,
            AllocationError::NoEligibleCell {
                iteration: 4,
                remaining_supply: 0,
                remaining_demand: 2,
            }
        );
    }

    #[test]
    fn test_minimum_cost_zero_demand() {
        let cost = CostMatrix::from_data(1, 2, vec![1.0, 2.0]).expect("valid");
        let inst = Instance::new("zero", vec![0], vec![0, 0], cost);
        let (alloc, result) = minimum_cost(&inst).expect("solvable");
        assert!(result.feasible);
        assert_eq!(result.iterations, 0);
        assert!(alloc.steps().is_empty());
    }
}
