//! Row and column penalties for Vogel's Approximation Method.

use crate::cost::CostMatrix;

/// Penalties of every row and column at one VAM iteration.
///
/// `None` marks an exhausted row (no supply left) or column (no demand
/// left); such lines are never selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Penalties {
    /// Penalty per source.
    pub rows: Vec<Option<f64>>,
    /// Penalty per sink.
    pub columns: Vec<Option<f64>>,
}

impl Penalties {
    /// First row carrying the largest penalty.
    pub fn max_row(&self) -> Option<(usize, f64)> {
        first_maximum(&self.rows)
    }

    /// First column carrying the largest penalty.
    pub fn max_column(&self) -> Option<(usize, f64)> {
        first_maximum(&self.columns)
    }
}

/// Computes the VAM penalty of every row and column.
///
/// A row's penalty is the gap between its two cheapest costs, taken over
/// sinks that still have demand; columns are symmetric over sources that
/// still have supply. A line with fewer than two eligible cells has
/// penalty 0.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::constructive::compute_penalties;
///
/// let cost = CostMatrix::from_rows(vec![
///     vec![8.0, 6.0, 10.0],
///     vec![9.0, 12.0, 13.0],
/// ]).unwrap();
///
/// let p = compute_penalties(&[5, 0], &[1, 1, 1], &cost);
/// assert_eq!(p.rows, vec![Some(2.0), None]);
/// // Only source 0 is open, so every column has a single eligible cell.
/// assert_eq!(p.columns, vec![Some(0.0), Some(0.0), Some(0.0)]);
/// ```
pub fn compute_penalties(
    remaining_supply: &[u64],
    remaining_demand: &[u64],
    cost: &CostMatrix,
) -> Penalties {
    let rows = remaining_supply
        .iter()
        .enumerate()
        .map(|(row, &supply)| {
            (supply > 0).then(|| {
                spread(
                    cost.row(row)
                        .iter()
                        .zip(remaining_demand)
                        .filter(|&(_, &demand)| demand > 0)
                        .map(|(&c, _)| c),
                )
            })
        })
        .collect();

    let columns = remaining_demand
        .iter()
        .enumerate()
        .map(|(col, &demand)| {
            (demand > 0).then(|| {
                spread(
                    cost.column(col)
                        .zip(remaining_supply)
                        .filter(|&(_, &supply)| supply > 0)
                        .map(|(c, _)| c),
                )
            })
        })
        .collect();

    Penalties { rows, columns }
}

/// Difference between the two smallest values, or 0 with fewer than two.
fn spread(costs: impl Iterator<Item = f64>) -> f64 {
    let (mut lowest, mut second) = (f64::INFINITY, f64::INFINITY);
    for c in costs {
        if c < lowest {
            second = lowest;
            lowest = c;
        } else if c < second {
            second = c;
        }
    }
    if second.is_finite() {
        second - lowest
    } else {
        0.0
    }
}

fn first_maximum(penalties: &[Option<f64>]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, penalty) in penalties.iter().enumerate() {
        let Some(p) = *penalty else { continue };
        match best {
            Some((_, b)) if p <= b => {}
            _ => best = Some((idx, p)),
        }
    }
    best
}
