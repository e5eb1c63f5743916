//! Allocation evaluation.
//!
//! Recomputes costs and checks supply/demand conservation for allocations
//! produced by any solver.

mod evaluator;

pub use evaluator::AllocationEvaluator;
