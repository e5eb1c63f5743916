//! Allocation matrix and step log.

use serde::{Deserialize, Serialize};

use super::total_quantity;

/// A single allocation step performed by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationStep {
    /// Source row.
    pub source: usize,
    /// Sink column.
    pub sink: usize,
    /// Quantity shipped in this step (may be zero for degenerate steps).
    pub amount: u64,
}

/// Quantities shipped on every source × sink route, plus the running cost.
///
/// # Examples
///
/// ```
/// use u_transport::models::Allocation;
///
/// let mut alloc = Allocation::new(2, 3);
/// alloc.allocate(0, 1, 5, 2.0);
/// alloc.allocate(1, 1, 3, 4.0);
/// assert_eq!(alloc.get(0, 1), 5);
/// assert_eq!(alloc.column_total(1), 8);
/// assert_eq!(alloc.total_cost(), 22.0);
/// assert_eq!(alloc.steps().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AllocationDocument")]
pub struct Allocation {
    cells: Vec<u64>,
    sources: usize,
    sinks: usize,
    steps: Vec<AllocationStep>,
    total_cost: f64,
}

impl Allocation {
    /// Creates an empty allocation for `sources × sinks` routes.
    pub fn new(sources: usize, sinks: usize) -> Self {
        Self {
            cells: vec![0; sources * sinks],
            sources,
            sinks,
            steps: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// Ships `amount` units from `source` to `sink` at `unit_cost` each.
    ///
    /// Records the step and adds `amount * unit_cost` to the total cost.
    pub fn allocate(&mut self, source: usize, sink: usize, amount: u64, unit_cost: f64) {
        self.cells[source * self.sinks + sink] += amount;
        self.total_cost += amount as f64 * unit_cost;
        self.steps.push(AllocationStep {
            source,
            sink,
            amount,
        });
    }

    /// Adds a cost term that is not tied to a shipped quantity.
    pub fn add_fixed_cost(&mut self, cost: f64) {
        self.total_cost += cost;
    }

    /// Quantity shipped from `source` to `sink`.
    pub fn get(&self, source: usize, sink: usize) -> u64 {
        self.cells[source * self.sinks + sink]
    }

    /// Total quantity shipped out of `source`.
    pub fn row_total(&self, source: usize) -> u128 {
        total_quantity(&self.cells[source * self.sinks..(source + 1) * self.sinks])
    }

    /// Total quantity delivered to `sink`.
    pub fn column_total(&self, sink: usize) -> u128 {
        (0..self.sources)
            .map(|source| u128::from(self.get(source, sink)))
            .sum()
    }

    /// Returns `true` if any route out of `source` carries a positive amount.
    pub fn row_has_positive(&self, source: usize) -> bool {
        self.cells[source * self.sinks..(source + 1) * self.sinks]
            .iter()
            .any(|&q| q > 0)
    }

    /// Steps in the order they were performed.
    pub fn steps(&self) -> &[AllocationStep] {
        &self.steps
    }

    /// Accumulated cost.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Number of sources.
    pub fn num_sources(&self) -> usize {
        self.sources
    }

    /// Number of sinks.
    pub fn num_sinks(&self) -> usize {
        self.sinks
    }

    /// Copies the matrix into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        (0..self.sources)
            .map(|s| self.cells[s * self.sinks..(s + 1) * self.sinks].to_vec())
            .collect()
    }
}

/// Serialized form of [`Allocation`], checked before it is accepted.
#[derive(Deserialize)]
struct AllocationDocument {
    cells: Vec<u64>,
    sources: usize,
    sinks: usize,
    steps: Vec<AllocationStep>,
    total_cost: f64,
}

impl TryFrom<AllocationDocument> for Allocation {
    type Error = String;

    fn try_from(doc: AllocationDocument) -> Result<Self, Self::Error> {
        let expected = doc
            .sources
            .checked_mul(doc.sinks)
            .ok_or_else(|| format!("allocation shape {}x{} overflows", doc.sources, doc.sinks))?;
        if doc.cells.len() != expected {
            return Err(format!(
                "allocation {}x{} needs {} cells, got {}",
                doc.sources,
                doc.sinks,
                expected,
                doc.cells.len()
            ));
        }
        if let Some(step) = doc
            .steps
            .iter()
            .find(|s| s.source >= doc.sources || s.sink >= doc.sinks)
        {
            return Err(format!(
                "step ({}, {}) outside {}x{} allocation",
                step.source, step.sink, doc.sources, doc.sinks
            ));
        }
        Ok(Self {
            cells: doc.cells,
            sources: doc.sources,
            sinks: doc.sinks,
            steps: doc.steps,
            total_cost: doc.total_cost,
        })
    }
}
