//! Seeded generator of balanced transportation instances.
//!
//! Supplies are drawn uniformly; demands are a random partition of the same
//! total, so every generated instance is balanced by construction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::batch::SizeClass;
use crate::cost::CostMatrix;
use crate::models::{FixedCost, FixedCostShape, Instance};

/// Produces reproducible random instances from a seed.
///
/// # Examples
///
/// ```
/// use u_transport::generator::InstanceGenerator;
///
/// let mut generator = InstanceGenerator::new(42).with_cost_range(1, 20);
/// let instance = generator.generate("random", 4, 6);
/// assert_eq!(instance.num_sources(), 4);
/// assert_eq!(instance.num_sinks(), 6);
/// assert!(instance.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    rng: StdRng,
    cost_range: (u32, u32),
    quantity_range: (u64, u64),
    fixed_cost: Option<(FixedCostShape, u32)>,
}

impl InstanceGenerator {
    /// Creates a generator with costs in `1..=100`, supplies in `1..=100`,
    /// and no fixed costs.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            cost_range: (1, 100),
            quantity_range: (1, 100),
            fixed_cost: None,
        }
    }

    /// Sets the inclusive range of integer unit costs.
    pub fn with_cost_range(mut self, min: u32, max: u32) -> Self {
        self.cost_range = (min.min(max), min.max(max));
        self
    }

    /// Sets the inclusive range of per-source supplies.
    pub fn with_quantity_range(mut self, min: u64, max: u64) -> Self {
        self.quantity_range = (min.min(max), min.max(max));
        self
    }

    /// Adds fixed costs of the given layout, drawn from `0..=max`.
    ///
    /// [`FixedCostShape::None`] clears any previous setting.
    pub fn with_fixed_cost(mut self, shape: FixedCostShape, max: u32) -> Self {
        self.fixed_cost = match shape {
            FixedCostShape::None => None,
            shape => Some((shape, max)),
        };
        self
    }

    /// Generates a balanced `sources × sinks` instance.
    ///
    /// Supplies are clamped to `u64::MAX / sources` so that their total
    /// always fits in a `u64`.
    pub fn generate(&mut self, name: impl Into<String>, sources: usize, sinks: usize) -> Instance {
        let cap = u64::MAX / u64::try_from(sources.max(1)).unwrap_or(u64::MAX);
        let (qmin, qmax) = self.quantity_range;
        let (qmin, qmax) = (qmin.min(cap), qmax.min(cap));
        let supply: Vec<u64> = (0..sources)
            .map(|_| self.rng.random_range(qmin..=qmax))
            .collect();
        let demand = self.partition(supply.iter().sum(), sinks);

        let (cmin, cmax) = self.cost_range;
        let mut cost = CostMatrix::new(sources, sinks);
        for i in 0..sources {
            for j in 0..sinks {
                cost.set(i, j, f64::from(self.rng.random_range(cmin..=cmax)));
            }
        }

        let fixed_cost = match self.fixed_cost {
            None => FixedCost::None,
            Some((FixedCostShape::PerSource, max)) => FixedCost::PerSource(
                (0..sources)
                    .map(|_| f64::from(self.rng.random_range(0..=max)))
                    .collect(),
            ),
            Some((_, max)) => {
                let mut fixed = CostMatrix::new(sources, sinks);
                for i in 0..sources {
                    for j in 0..sinks {
                        fixed.set(i, j, f64::from(self.rng.random_range(0..=max)));
                    }
                }
                FixedCost::PerRoute(fixed)
            }
        };

        Instance::new(name, supply, demand, cost).with_fixed_cost(fixed_cost)
    }

    /// Generates the `index`-th instance of a benchmark size class, named
    /// `<class>_<index>`.
    ///
    /// Returns `None` for [`SizeClass::Unknown`].
    pub fn generate_size_class(&mut self, class: SizeClass, index: usize) -> Option<Instance> {
        let (sources, sinks) = class.dimensions()?;
        let name = format!("{}_{index}", class.prefix()?);
        Some(self.generate(name, sources, sinks))
    }

    /// Splits `total` into `parts` non-negative integers.
    fn partition(&mut self, total: u64, parts: usize) -> Vec<u64> {
        if parts == 0 {
            return Vec::new();
        }
        let mut cuts: Vec<u64> = (0..parts - 1)
            .map(|_| self.rng.random_range(0..=total))
            .collect();
        cuts.sort_unstable();

        let mut demand = Vec::with_capacity(parts);
        let mut prev = 0;
        for cut in cuts {
            demand.push(cut - prev);
            prev = cut;
        }
        demand.push(total - prev);
        demand
    }
}
