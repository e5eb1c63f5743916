//! Domain model types for transportation problems.
//!
//! Provides the instance (supply, demand, unit and fixed costs), the
//! allocation a solver builds, the uniform result envelope, and the
//! violation types reported by the evaluator.

mod allocation;
mod instance;
mod result;
mod violation;

pub use allocation::{Allocation, AllocationStep};
pub use instance::{FixedCost, FixedCostShape, Instance};
pub(crate) use instance::total_quantity;
pub use result::SolverResult;
pub use violation::{Violation, ViolationType};
