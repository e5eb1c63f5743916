//! Allocation evaluator that recomputes cost and checks conservation.

use crate::models::{Allocation, FixedCost, Instance, Violation, ViolationType};
use crate::solver::Method;

/// Checks an allocation against its instance, independently of the solver
/// that built it.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::models::Instance;
/// use u_transport::constructive::vogel;
/// use u_transport::evaluation::AllocationEvaluator;
///
/// let cost = CostMatrix::from_rows(vec![vec![4.0, 6.0], vec![5.0, 3.0]]).unwrap();
/// let instance = Instance::new("tiny", vec![10, 15], vec![12, 13], cost);
/// let (allocation, result) = vogel(&instance).unwrap();
///
/// let evaluator = AllocationEvaluator::new(&instance);
/// let (transport, violations) = evaluator.evaluate(&allocation);
/// assert!(violations.is_empty());
/// assert_eq!(transport, result.cost);
/// ```
pub struct AllocationEvaluator<'a> {
    instance: &'a Instance,
}

impl<'a> AllocationEvaluator<'a> {
    /// Creates a new evaluator for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Sum of shipped quantity times unit cost over all routes.
    pub fn transport_cost(&self, allocation: &Allocation) -> f64 {
        let cost = self.instance.cost();
        let mut total = 0.0;
        for i in 0..allocation.num_sources() {
            for j in 0..allocation.num_sinks() {
                total += allocation.get(i, j) as f64 * cost.get(i, j);
            }
        }
        total
    }

    /// Fixed costs charged once per source or route that carries a positive
    /// allocation.
    pub fn opened_fixed_cost(&self, allocation: &Allocation) -> f64 {
        match self.instance.fixed_cost() {
            FixedCost::None => 0.0,
            FixedCost::PerSource(fixed) => fixed
                .iter()
                .enumerate()
                .filter(|&(i, _)| allocation.row_has_positive(i))
                .map(|(_, &f)| f)
                .sum(),
            FixedCost::PerRoute(fixed) => {
                let mut total = 0.0;
                for i in 0..allocation.num_sources() {
                    for j in 0..allocation.num_sinks() {
                        if allocation.get(i, j) > 0 {
                            total += fixed.get(i, j);
                        }
                    }
                }
                total
            }
        }
    }

    /// Cost that `method` reports for `allocation`.
    ///
    /// North-West Corner and Vogel report the transport cost only. The
    /// Minimum-Cost method adds the route fixed cost once per allocation
    /// step on that route.
    pub fn reported_cost(&self, method: Method, allocation: &Allocation) -> f64 {
        let transport = self.transport_cost(allocation);
        match (method, self.instance.fixed_cost()) {
            (Method::MinimumCost, FixedCost::PerRoute(fixed)) => {
                transport
                    + allocation
                        .steps()
                        .iter()
                        .map(|s| fixed.get(s.source, s.sink))
                        .sum::<f64>()
            }
            _ => transport,
        }
    }

    /// Recomputes the transport cost and lists conservation violations.
    ///
    /// A valid allocation ships exactly each source's supply and delivers
    /// exactly each sink's demand.
    pub fn evaluate(&self, allocation: &Allocation) -> (f64, Vec<Violation>) {
        let expected = (self.instance.num_sources(), self.instance.num_sinks());
        let actual = (allocation.num_sources(), allocation.num_sinks());
        if expected != actual {
            return (
                0.0,
                vec![Violation::new(ViolationType::ShapeMismatch { expected, actual })],
            );
        }

        let mut violations = Vec::new();
        for (i, &supply) in self.instance.supply().iter().enumerate() {
            let shipped = allocation.row_total(i);
            if shipped != u128::from(supply) {
                violations.push(Violation::new(ViolationType::SupplyMismatch {
                    source_index: i,
                    shipped,
                    supply,
                }));
            }
        }
        for (j, &demand) in self.instance.demand().iter().enumerate() {
            let received = allocation.column_total(j);
            if received != u128::from(demand) {
                violations.push(Violation::new(ViolationType::DemandMismatch {
                    sink_index: j,
                    received,
                    demand,
                }));
            }
        }

        (self.transport_cost(allocation), violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::{minimum_cost, sample_instance};
    use crate::cost::CostMatrix;

    #[test]
    fn test_evaluate_empty_allocation() {
        let inst = sample_instance();
        let eval = AllocationEvaluator::new(&inst);
        let (cost, violations) = eval.evaluate(&Allocation::new(3, 3));
        assert_eq!(cost, 0.0);
        assert_eq!(violations.len(), 6);
        assert!(matches!(
            violations[0].kind,
            ViolationType::SupplyMismatch {
                source_index: 0,
                shipped: 0,
                supply: 20,
            }
        ));
    }

    #[test]
    fn test_evaluate_partial() {
        let inst = sample_instance();
        let eval = AllocationEvaluator::new(&inst);
        let mut alloc = Allocation::new(3, 3);
        alloc.allocate(0, 0, 10, 8.0);
        alloc.allocate(0, 1, 10, 6.0);
        let (cost, violations) = eval.evaluate(&alloc);
        assert!((cost - 140.0).abs() < 1e-10);
        // sources 1, 2 and sinks 1, 2 are short; source 0 and sink 0 are exact
        assert_eq!(violations.len(), 4);
    }

    #[test]
    fn test_evaluate_shape_mismatch() {
        let inst = sample_instance();
        let eval = AllocationEvaluator::new(&inst);
        let (_, violations) = eval.evaluate(&Allocation::new(2, 3));
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::ShapeMismatch {
                expected: (3, 3),
                actual: (2, 3),
            }
        ));
    }

    #[test]
    fn test_reported_cost_matches_minimum_cost_rule() {
        let fixed = CostMatrix::from_data(3, 3, (1..=9).map(f64::from).collect()).expect("valid");
        let inst = sample_instance().with_fixed_cost(FixedCost::PerRoute(fixed));
        let (alloc, result) = minimum_cost(&inst).expect("solvable");
        let eval = AllocationEvaluator::new(&inst);
        assert!((eval.reported_cost(Method::MinimumCost, &alloc) - result.cost).abs() < 1e-9);
        // Each route is used once here, so per-step and per-route charging agree.
        let opened = eval.opened_fixed_cost(&alloc);
        assert!((eval.transport_cost(&alloc) + opened - result.cost).abs() < 1e-9);
    }

    #[test]
    fn test_opened_fixed_cost_per_source() {
        let inst = sample_instance().with_fixed_cost(FixedCost::PerSource(vec![1.0, 10.0, 100.0]));
        let eval = AllocationEvaluator::new(&inst);
        let mut alloc = Allocation::new(3, 3);
        alloc.allocate(2, 0, 1, 14.0);
        assert_eq!(eval.opened_fixed_cost(&alloc), 100.0);
        assert_eq!(eval.reported_cost(Method::Vogel, &alloc), 14.0);
    }
}
