//! Uniform solver output envelope.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::solver::Method;

/// Summary of one solver run on one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Heuristic that produced this result.
    pub method: Method,
    /// Total cost, including whatever fixed-cost terms the method charges.
    pub cost: f64,
    /// Number of allocation steps performed.
    pub iterations: usize,
    /// Wall-clock time spent inside the solver.
    pub elapsed: Duration,
    /// `true` if supply and demand were both fully exhausted.
    pub feasible: bool,
}
