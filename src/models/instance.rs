//! Transportation problem instance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cost::CostMatrix;
use crate::error::PreconditionError;

/// Fixed costs charged when a source or route carries a positive allocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedCost {
    /// No fixed costs.
    #[default]
    None,
    /// One opening cost per source (`Fj`).
    PerSource(Vec<f64>),
    /// One opening cost per source × sink route (`Fjk`).
    PerRoute(CostMatrix),
}

impl FixedCost {
    /// Layout of this fixed-cost table.
    pub fn shape(&self) -> FixedCostShape {
        match self {
            FixedCost::None => FixedCostShape::None,
            FixedCost::PerSource(_) => FixedCostShape::PerSource,
            FixedCost::PerRoute(_) => FixedCostShape::PerRoute,
        }
    }
}

/// Layout tag of a [`FixedCost`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedCostShape {
    /// No fixed costs.
    None,
    /// Per-source vector.
    PerSource,
    /// Per-route matrix.
    PerRoute,
}

impl fmt::Display for FixedCostShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FixedCostShape::None => "no",
            FixedCostShape::PerSource => "per_source",
            FixedCostShape::PerRoute => "per_route",
        };
        f.write_str(name)
    }
}

/// A transportation problem: sources with supply, sinks with demand, and
/// a unit cost for every source × sink route.
///
/// Instances are immutable once built; solvers derive their own working
/// copies of supply and demand.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::models::Instance;
///
/// let cost = CostMatrix::from_rows(vec![vec![4.0, 6.0], vec![5.0, 3.0]]).unwrap();
/// let instance = Instance::new("tiny", vec![10, 15], vec![12, 13], cost);
/// assert_eq!(instance.num_sources(), 2);
/// assert_eq!(instance.total_supply(), 25);
/// assert!(instance.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    name: String,
    supply: Vec<u64>,
    demand: Vec<u64>,
    cost: CostMatrix,
    #[serde(default)]
    fixed_cost: FixedCost,
}

impl Instance {
    /// Creates an instance without fixed costs.
    pub fn new(
        name: impl Into<String>,
        supply: Vec<u64>,
        demand: Vec<u64>,
        cost: CostMatrix,
    ) -> Self {
        Self {
            name: name.into(),
            supply,
            demand,
            cost,
            fixed_cost: FixedCost::None,
        }
    }

    /// Sets the fixed-cost table.
    pub fn with_fixed_cost(mut self, fixed_cost: FixedCost) -> Self {
        self.fixed_cost = fixed_cost;
        self
    }

    /// Instance identifier, used for reporting.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Supply per source.
    pub fn supply(&self) -> &[u64] {
        &self.supply
    }

    /// Demand per sink.
    pub fn demand(&self) -> &[u64] {
        &self.demand
    }

    /// Unit shipping costs.
    pub fn cost(&self) -> &CostMatrix {
        &self.cost
    }

    /// Fixed-cost table.
    pub fn fixed_cost(&self) -> &FixedCost {
        &self.fixed_cost
    }

    /// Number of sources (`d`).
    pub fn num_sources(&self) -> usize {
        self.supply.len()
    }

    /// Number of sinks (`r`).
    pub fn num_sinks(&self) -> usize {
        self.demand.len()
    }

    /// Sum of all supplies.
    ///
    /// Widened to `u128` so that no combination of `u64` entries overflows.
    pub fn total_supply(&self) -> u128 {
        total_quantity(&self.supply)
    }

    /// Sum of all demands, widened to `u128`.
    pub fn total_demand(&self) -> u128 {
        total_quantity(&self.demand)
    }

    /// Returns `true` if total supply equals total demand.
    pub fn is_balanced(&self) -> bool {
        self.total_supply() == self.total_demand()
    }

    /// Checks dimensions and cost values, but not balance.
    pub fn validate_shape(&self) -> Result<(), PreconditionError> {
        let (d, r) = (self.num_sources(), self.num_sinks());
        if d == 0 || r == 0 {
            return Err(PreconditionError::EmptyInstance {
                sources: d,
                sinks: r,
            });
        }
        check_len("cost rows", d, self.cost.rows())?;
        check_len("cost columns", r, self.cost.cols())?;
        if let Some((row, col, value)) = self.cost.first_invalid() {
            return Err(PreconditionError::InvalidCost { row, col, value });
        }

        match &self.fixed_cost {
            FixedCost::None => {}
            FixedCost::PerSource(costs) => {
                check_len("per-source fixed costs", d, costs.len())?;
                if let Some(row) = costs.iter().position(|c| !c.is_finite() || *c < 0.0) {
                    return Err(PreconditionError::InvalidCost {
                        row,
                        col: 0,
                        value: costs[row],
                    });
                }
            }
            FixedCost::PerRoute(costs) => {
                check_len("fixed cost rows", d, costs.rows())?;
                check_len("fixed cost columns", r, costs.cols())?;
                if let Some((row, col, value)) = costs.first_invalid() {
                    return Err(PreconditionError::InvalidCost { row, col, value });
                }
            }
        }
        Ok(())
    }

    /// Checks shape, cost values, and supply/demand balance.
    pub fn validate(&self) -> Result<(), PreconditionError> {
        self.validate_shape()?;
        let (supply, demand) = (self.total_supply(), self.total_demand());
        if supply != demand {
            return Err(PreconditionError::Unbalanced { supply, demand });
        }
        Ok(())
    }
}

/// Sum of `u64` quantities without overflow.
pub(crate) fn total_quantity(quantities: &[u64]) -> u128 {
    quantities.iter().map(|&q| u128::from(q)).sum()
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), PreconditionError> {
    if expected != actual {
        return Err(PreconditionError::DimensionMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(rows: usize, cols: usize) -> CostMatrix {
        CostMatrix::from_data(rows, cols, vec![1.0; rows * cols]).expect("valid")
    }

    #[test]
    fn test_instance_accessors() {
        let inst = Instance::new("a", vec![5, 5], vec![3, 7], square(2, 2));
        assert_eq!(inst.name(), "a");
        assert_eq!(inst.num_sources(), 2);
        assert_eq!(inst.num_sinks(), 2);
        assert_eq!(inst.total_supply(), 10);
        assert_eq!(inst.total_demand(), 10);
        assert!(inst.is_balanced());
        assert_eq!(inst.fixed_cost().shape(), FixedCostShape::None);
    }

    #[test]
    fn test_unbalanced() {
        let inst = Instance::new("u", vec![5, 5], vec![3, 3, 3], square(2, 3));
        assert!(inst.validate_shape().is_ok());
        assert_eq!(
            inst.validate(),
            Err(PreconditionError::Unbalanced {
                supply: 10,
                demand: 9
            })
        );
    }

    #[test]
    fn test_totals_beyond_u64_do_not_wrap() {
        let inst = Instance::new("big", vec![u64::MAX, 1], vec![0], square(2, 1));
        assert_eq!(inst.total_supply(), u128::from(u64::MAX) + 1);
        assert!(!inst.is_balanced());
        assert_eq!(
            inst.validate(),
            Err(PreconditionError::Unbalanced {
                supply: u128::from(u64::MAX) + 1,
                demand: 0,
            })
        );
    }

    #[test]
    fn test_balanced_beyond_u64() {
        let inst = Instance::new("big", vec![u64::MAX, 1], vec![1, u64::MAX], square(2, 2));
        assert!(inst.validate().is_ok());
    }

    #[test]
    fn test_empty() {
        let inst = Instance::new("e", vec![], vec![1], CostMatrix::new(0, 1));
        assert!(matches!(
            inst.validate(),
            Err(PreconditionError::EmptyInstance { sources: 0, sinks: 1 })
        ));
    }

    #[test]
    fn test_cost_shape_mismatch() {
        let inst = Instance::new("m", vec![5, 5], vec![10], square(2, 2));
        assert_eq!(
            inst.validate(),
            Err(PreconditionError::DimensionMismatch {
                what: "cost columns",
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_negative_cost() {
        let mut cost = square(2, 2);
        cost.set(1, 0, -3.0);
        let inst = Instance::new("n", vec![1, 1], vec![1, 1], cost);
        assert!(matches!(
            inst.validate(),
            Err(PreconditionError::InvalidCost { row: 1, col: 0, .. })
        ));
    }

    #[test]
    fn test_fixed_cost_shape_mismatch() {
        let inst = Instance::new("f", vec![1, 1], vec![1, 1], square(2, 2))
            .with_fixed_cost(FixedCost::PerSource(vec![1.0, 2.0, 3.0]));
        assert!(matches!(
            inst.validate(),
            Err(PreconditionError::DimensionMismatch {
                what: "per-source fixed costs",
                ..
            })
        ));

        let inst = Instance::new("f", vec![1, 1], vec![1, 1], square(2, 2))
            .with_fixed_cost(FixedCost::PerRoute(square(2, 3)));
        assert!(inst.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_default_fixed_cost() {
        let json = r#"{
            "name": "j",
            "supply": [2, 3],
            "demand": [5],
            "cost": [[1.0], [2.0]]
        }"#;
        let inst: Instance = serde_json::from_str(json).expect("valid json");
        assert_eq!(inst.cost().get(1, 0), 2.0);
        assert_eq!(inst.fixed_cost(), &FixedCost::None);
    }

    #[test]
    fn test_deserialize_per_route() {
        let json = r#"{
            "name": "j",
            "supply": [2],
            "demand": [1, 1],
            "cost": [[1.0, 2.0]],
            "fixed_cost": {"per_route": [[10.0, 20.0]]}
        }"#;
        let inst: Instance = serde_json::from_str(json).expect("valid json");
        assert_eq!(inst.fixed_cost().shape(), FixedCostShape::PerRoute);
        assert!(inst.validate().is_ok());
    }
}
