//! # u-transport
//!
//! Transportation problem library providing the instance model and three
//! constructive heuristics for shipping supply from sources to sinks at low
//! cost: North-West Corner, Minimum-Cost, and Vogel's Approximation Method.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Instance, FixedCost, Allocation, SolverResult)
//! - [`cost`] — Dense source × sink cost matrix
//! - [`constructive`] — The three heuristics and VAM penalty computation
//! - [`solver`] — `Method` selection and the `Solver` trait
//! - [`evaluation`] — Conservation checks and cost recomputation
//! - [`batch`] — Batch driver, result sinks (CSV), and per-size-class summaries
//! - [`generator`] — Seeded random balanced instances
//! - [`io`] — JSON instance source
//! - [`error`] — Precondition, allocation, and parse errors

pub mod batch;
pub mod constructive;
pub mod cost;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod io;
pub mod models;
pub mod solver;
