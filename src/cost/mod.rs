//! Route cost matrices.
//!
//! Provides a dense source × sink matrix used for unit shipping costs and
//! per-route fixed costs.

mod matrix;

pub use matrix::CostMatrix;
