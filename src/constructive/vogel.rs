//! Vogel's Approximation Method (VAM).
//!
//! At every iteration, computes a penalty for each open row and column (the
//! gap between its two cheapest eligible costs), picks the line with the
//! largest penalty, and ships as much as possible on the cheapest eligible
//! cell of that line.
//!
//! # Complexity
//!
//! O((d + r) · d · r): at most `d + r - 1` iterations, each recomputing all
//! penalties.
//!
//! # Reference
//!
//! Reinfeld, N. V. & Vogel, W. R. (1958). *Mathematical Programming*.
//! Prentice-Hall.

use std::time::Instant;

use tracing::debug;

use super::penalty::compute_penalties;
use super::remaining::Remaining;
use crate::cost::CostMatrix;
use crate::error::{AllocationError, SolveResult};
use crate::models::{Allocation, FixedCost, Instance, SolverResult};
use crate::solver::{check_preconditions, Method};

/// Builds an allocation with Vogel's Approximation Method.
///
/// When the largest row penalty equals the largest column penalty, the row
/// wins. Within the chosen line, ties on cost go to the lowest index.
///
/// Per-source fixed costs are charged for sources that already ship
/// something when the run starts. The allocation is empty at that point, so
/// they never contribute to the reported cost.
///
/// # Errors
///
/// Returns a precondition error for malformed or unbalanced instances, or
/// for per-route fixed costs; returns an allocation error if no eligible
/// cell exists while supply and demand remain.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::models::Instance;
/// use u_transport::constructive::vogel;
///
/// let cost = CostMatrix::from_rows(vec![
///     vec![8.0, 6.0, 10.0],
///     vec![9.0, 12.0, 13.0],
///     vec![14.0, 9.0, 16.0],
/// ]).unwrap();
/// let instance = Instance::new("s", vec![20, 30, 25], vec![10, 25, 40], cost);
///
/// let (allocation, result) = vogel(&instance).unwrap();
/// assert!(result.feasible);
/// assert_eq!(result.iterations, 4);
/// assert_eq!(allocation.get(2, 1), 25);
/// assert_eq!(result.cost, 775.0);
/// ```
pub fn vogel(instance: &Instance) -> SolveResult<(Allocation, SolverResult)> {
    check_preconditions(instance, Method::Vogel)?;
    Ok(approximate(instance, Remaining::from_instance(instance))?)
}

fn approximate(
    instance: &Instance,
    mut remaining: Remaining,
) -> Result<(Allocation, SolverResult), AllocationError> {
    let started = Instant::now();
    let cost = instance.cost();
    let mut allocation = Allocation::new(remaining.supply().len(), remaining.demand().len());

    if let FixedCost::PerSource(fixed) = instance.fixed_cost() {
        for (source, &opening) in fixed.iter().enumerate() {
            if allocation.row_has_positive(source) {
                allocation.add_fixed_cost(opening);
            }
        }
    }

    let mut iterations = 0;
    while remaining.has_supply() && remaining.has_demand() {
        iterations += 1;
        let (row, col) = select_cell(cost, &remaining).ok_or_else(|| remaining.stuck(iterations))?;

        let amount = remaining.ship(row, col);
        allocation.allocate(row, col, amount, cost.get(row, col));
        debug!(source = row, sink = col, amount, iteration = iterations, "vogel step");
    }

    Ok(remaining.conclude(Method::Vogel, allocation, iterations, started))
}

/// Picks the cell to allocate next, or `None` if no line is eligible.
fn select_cell(cost: &CostMatrix, remaining: &Remaining) -> Option<(usize, usize)> {
    let penalties = compute_penalties(remaining.supply(), remaining.demand(), cost);
    let best_row = penalties.max_row();
    let best_col = penalties.max_column();

    let by_row = match (best_row, best_col) {
        (Some((_, row_penalty)), Some((_, col_penalty))) => row_penalty >= col_penalty,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => return None,
    };

    if by_row {
        let (row, _) = best_row?;
        let col = cost.cheapest_in_row(row, &remaining.open_sinks())?;
        Some((row, col))
    } else {
        let (col, _) = best_col?;
        let row = cost.cheapest_in_column(col, &remaining.open_sources())?;
        Some((row, col))
    }
}
