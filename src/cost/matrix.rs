//! Dense source × sink cost matrix.

use serde::{Deserialize, Serialize};

/// A dense `rows × cols` cost matrix stored in row-major order.
///
/// Rows are sources and columns are sinks. The same type carries unit
/// shipping costs and per-route fixed costs.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
///
/// let cm = CostMatrix::from_rows(vec![
///     vec![8.0, 6.0, 10.0],
///     vec![9.0, 12.0, 13.0],
/// ]).expect("rectangular");
/// assert_eq!(cm.rows(), 2);
/// assert_eq!(cm.cols(), 3);
/// assert_eq!(cm.get(1, 2), 13.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CostMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl CostMatrix {
    /// Creates a cost matrix of the given shape, initialized to zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates a cost matrix from an explicit row-major buffer.
    ///
    /// Returns `None` if the data length doesn't match `rows * cols`.
    pub fn from_data(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { data, rows, cols })
    }

    /// Creates a cost matrix from nested rows.
    ///
    /// Returns `None` if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != n_cols) {
            return None;
        }
        let data = rows.into_iter().flatten().collect();
        Self::from_data(n_rows, n_cols, data)
    }

    /// Returns the cost of the route from source `row` to sink `col`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Sets the cost of the route from source `row` to sink `col`.
    pub fn set(&mut self, row: usize, col: usize, cost: f64) {
        self.data[row * self.cols + col] = cost;
    }

    /// Number of rows (sources).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (sinks).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the costs of row `row` as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterates over the costs of column `col` in row order.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).map(move |row| self.get(row, col))
    }

    /// Returns the first cell that is negative or non-finite, if any.
    pub fn first_invalid(&self) -> Option<(usize, usize, f64)> {
        self.data
            .iter()
            .position(|c| !c.is_finite() || *c < 0.0)
            .map(|idx| (idx / self.cols, idx % self.cols, self.data[idx]))
    }

    /// Returns the cheapest column of `row` among those with `open[col]`.
    ///
    /// Ties resolve to the lowest column index. Returns `None` if no column
    /// is open.
    pub fn cheapest_in_row(&self, row: usize, open: &[bool]) -> Option<usize> {
        first_minimum(
            self.row(row)
                .iter()
                .copied()
                .enumerate()
                .filter(|&(col, _)| open[col]),
        )
    }

    /// Returns the cheapest row of `col` among those with `open[row]`.
    ///
    /// Ties resolve to the lowest row index. Returns `None` if no row is open.
    pub fn cheapest_in_column(&self, col: usize, open: &[bool]) -> Option<usize> {
        first_minimum(
            self.column(col)
                .enumerate()
                .filter(|&(row, _)| open[row]),
        )
    }
}

/// Index of the first strictly smallest value.
fn first_minimum(values: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in values {
        match best {
            Some((_, b)) if value >= b => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = String;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows).ok_or_else(|| "cost matrix rows must have equal length".to_string())
    }
}

impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CostMatrix) -> Self {
        if matrix.cols == 0 {
            return vec![Vec::new(); matrix.rows];
        }
        matrix
            .data
            .chunks(matrix.cols)
            .map(<[f64]>::to_vec)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CostMatrix {
        CostMatrix::from_rows(vec![
            vec![8.0, 6.0, 10.0],
            vec![9.0, 12.0, 13.0],
            vec![14.0, 9.0, 16.0],
        ])
        .expect("valid")
    }

    #[test]
    fn test_from_rows() {
        let cm = sample();
        assert_eq!(cm.rows(), 3);
        assert_eq!(cm.cols(), 3);
        assert_eq!(cm.get(2, 1), 9.0);
        assert_eq!(cm.row(1), &[9.0, 12.0, 13.0]);
        assert_eq!(cm.column(0).collect::<Vec<_>>(), vec![8.0, 9.0, 14.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(CostMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_none());
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(CostMatrix::from_data(2, 3, vec![0.0; 5]).is_none());
    }

    #[test]
    fn test_set_get_rectangular() {
        let mut cm = CostMatrix::new(2, 4);
        cm.set(1, 3, 7.5);
        assert_eq!(cm.get(1, 3), 7.5);
        assert_eq!(cm.get(0, 3), 0.0);
    }

    #[test]
    fn test_first_invalid() {
        assert!(sample().first_invalid().is_none());
        let mut cm = sample();
        cm.set(1, 2, -1.0);
        assert_eq!(cm.first_invalid(), Some((1, 2, -1.0)));
        cm.set(0, 1, f64::NAN);
        assert_eq!(cm.first_invalid().map(|(r, c, _)| (r, c)), Some((0, 1)));
    }

    #[test]
    fn test_cheapest_in_row_respects_mask() {
        let cm = sample();
        assert_eq!(cm.cheapest_in_row(0, &[true, true, true]), Some(1));
        assert_eq!(cm.cheapest_in_row(0, &[true, false, true]), Some(0));
        assert_eq!(cm.cheapest_in_row(0, &[false, false, false]), None);
    }

    #[test]
    fn test_cheapest_ties_take_first() {
        let cm = CostMatrix::from_rows(vec![vec![3.0, 1.0, 1.0], vec![1.0, 5.0, 1.0]])
            .expect("valid");
        assert_eq!(cm.cheapest_in_row(0, &[true, true, true]), Some(1));
        assert_eq!(cm.cheapest_in_column(2, &[true, true]), Some(0));
        assert_eq!(cm.cheapest_in_column(2, &[false, true]), Some(1));
    }

    #[test]
    fn test_nested_conversion() {
        let rows: Vec<Vec<f64>> = sample().into();
        assert_eq!(rows[2], vec![14.0, 9.0, 16.0]);
    }
}
