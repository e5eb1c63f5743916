//! Working copy of supply and demand owned by a single solve.

use std::time::Instant;

use crate::error::AllocationError;
use crate::models::{total_quantity, Allocation, Instance, SolverResult};
use crate::solver::Method;

/// Residual supply and demand during one solver run.
#[derive(Debug, Clone)]
pub(crate) struct Remaining {
    supply: Vec<u64>,
    demand: Vec<u64>,
}

impl Remaining {
    pub(crate) fn from_instance(instance: &Instance) -> Self {
        Self::new(instance.supply().to_vec(), instance.demand().to_vec())
    }

    pub(crate) fn new(supply: Vec<u64>, demand: Vec<u64>) -> Self {
        Self { supply, demand }
    }

    pub(crate) fn supply(&self) -> &[u64] {
        &self.supply
    }

    pub(crate) fn demand(&self) -> &[u64] {
        &self.demand
    }

    pub(crate) fn total_supply(&self) -> u128 {
        total_quantity(&self.supply)
    }

    pub(crate) fn total_demand(&self) -> u128 {
        total_quantity(&self.demand)
    }

    pub(crate) fn has_supply(&self) -> bool {
        self.supply.iter().any(|&s| s > 0)
    }

    pub(crate) fn has_demand(&self) -> bool {
        self.demand.iter().any(|&d| d > 0)
    }

    /// Sources that still have something to ship.
    pub(crate) fn open_sources(&self) -> Vec<bool> {
        self.supply.iter().map(|&s| s > 0).collect()
    }

    /// Sinks that still need something.
    pub(crate) fn open_sinks(&self) -> Vec<bool> {
        self.demand.iter().map(|&d| d > 0).collect()
    }

    /// Ships as much as possible on `(source, sink)` and returns the amount.
    pub(crate) fn ship(&mut self, source: usize, sink: usize) -> u64 {
        let amount = self.supply[source].min(self.demand[sink]);
        self.supply[source] -= amount;
        self.demand[sink] -= amount;
        amount
    }

    pub(crate) fn stuck(&self, iteration: usize) -> AllocationError {
        AllocationError::NoEligibleCell {
            iteration,
            remaining_supply: self.total_supply(),
            remaining_demand: self.total_demand(),
        }
    }

    /// Wraps up a run into the uniform result envelope.
    pub(crate) fn conclude(
        &self,
        method: Method,
        allocation: Allocation,
        iterations: usize,
        started: Instant,
    ) -> (Allocation, SolverResult) {
        let result = SolverResult {
            method,
            cost: allocation.total_cost(),
            iterations,
            elapsed: started.elapsed(),
            feasible: !self.has_supply() && !self.has_demand(),
        };
        (allocation, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_takes_minimum() {
        let mut rem = Remaining::new(vec![5, 2], vec![3, 4]);
        assert_eq!(rem.ship(0, 1), 4);
        assert_eq!(rem.supply(), &[1, 2]);
        assert_eq!(rem.demand(), &[3, 0]);
        assert_eq!(rem.open_sinks(), vec![true, false]);
        assert_eq!(rem.open_sources(), vec![true, true]);
    }

    #[test]
    fn test_stuck_reports_totals() {
        let rem = Remaining::new(vec![0, 0], vec![2, 1]);
        assert_eq!(
            rem.stuck(4),
            AllocationError::NoEligibleCell {
                iteration: 4,
                remaining_supply: 0,
                remaining_demand: 3,
            }
        );
    }

    #[test]
    fn test_totals_beyond_u64() {
        let mut rem = Remaining::new(vec![u64::MAX, u64::MAX], vec![u64::MAX, 1]);
        assert_eq!(rem.total_supply(), 2 * u128::from(u64::MAX));
        assert_eq!(rem.ship(0, 0), u64::MAX);
        assert!(rem.has_supply());
        assert!(rem.has_demand());
        assert_eq!(rem.ship(1, 1), 1);
        assert!(!rem.has_demand());
        assert_eq!(rem.total_supply(), u128::from(u64::MAX) - 1);
    }
}
