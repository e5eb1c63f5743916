//! Error types for transportation solvers.

use thiserror::Error;

use crate::models::FixedCostShape;
use crate::solver::Method;

/// Result type for solver entry points.
pub type SolveResult<T> = Result<T, SolveError>;

/// An instance that cannot be handed to a solver.
///
/// Raised before any allocation step takes place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreconditionError {
    /// The instance has no sources or no sinks.
    #[error("instance has no sources or no sinks ({sources}x{sinks})")]
    EmptyInstance {
        /// Number of sources.
        sources: usize,
        /// Number of sinks.
        sinks: usize,
    },

    /// A vector or matrix disagrees with the supply/demand dimensions.
    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which part of the instance is malformed.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A cost entry is negative or not finite.
    #[error("invalid cost {value} at ({row}, {col})")]
    InvalidCost {
        /// Source index.
        row: usize,
        /// Sink index.
        col: usize,
        /// Offending value.
        value: f64,
    },

    /// Total supply differs from total demand.
    #[error("unbalanced instance: supply {supply} != demand {demand}")]
    Unbalanced {
        /// Total supply.
        supply: u128,
        /// Total demand.
        demand: u128,
    },

    /// The solver does not understand the instance's fixed-cost layout.
    #[error("{method} does not accept {shape} fixed costs")]
    FixedCostShape {
        /// Solver that rejected the instance.
        method: Method,
        /// Fixed-cost layout of the instance.
        shape: FixedCostShape,
    },
}

/// A solve that got stuck mid-way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// Residual demand remains but no route has both supply and demand.
    #[error(
        "no eligible cell at iteration {iteration} \
         (remaining supply {remaining_supply}, remaining demand {remaining_demand})"
    )]
    NoEligibleCell {
        /// Iteration at which the solver got stuck (1-based).
        iteration: usize,
        /// Total remaining supply.
        remaining_supply: u128,
        /// Total remaining demand.
        remaining_demand: u128,
    },
}

/// Instance source failure.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not a well-formed instance.
    #[error("malformed instance document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but describes an inconsistent instance.
    #[error("invalid instance: {0}")]
    Invalid(#[from] PreconditionError),
}

/// Any failure of a solver entry point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Instance rejected before solving.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// Solver got stuck.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}
