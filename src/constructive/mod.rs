//! Constructive heuristics for the transportation problem.
//!
//! - [`north_west_corner`] — Positional sweep from the top-left cell, O(d + r)
//! - [`minimum_cost`] — Greedy cheapest-route selection, O((d + r)·d·r)
//! - [`vogel`] — Vogel's Approximation Method (penalty lookahead), O((d + r)·d·r)
//! - [`compute_penalties`] — VAM row/column penalties for one iteration

mod minimum_cost;
mod north_west;
mod penalty;
mod remaining;
mod vogel;

pub use minimum_cost::minimum_cost;
pub use north_west::north_west_corner;
pub use penalty::{compute_penalties, Penalties};
pub use vogel::vogel;

/// Three sources, three sinks, all costs distinct.
#[cfg(test)]
pub(crate) fn sample_instance() -> crate::models::Instance {
    let cost = crate::cost::CostMatrix::from_rows(vec![
        vec![8.0, 6.0, 10.0],
        vec![9.0, 12.0, 13.0],
        vec![14.0, 9.0, 16.0],
    ])
    .expect("valid");
    crate::models::Instance::new("sample", vec![20, 30, 25], vec![10, 25, 40], cost)
}
