//! Compressed sparse row matrix for term weights.

use serde::{Deserialize, Serialize};

use crate::error::{FeaturizerError, Result};

/// A row-major sparse matrix in CSR layout.
///
/// Row `r` holds the entries `indices[indptr[r]..indptr[r + 1]]` with values
/// `data[indptr[r]..indptr[r + 1]]`. Column indices are strictly increasing
/// within a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl SparseMatrix {
    /// Create an empty matrix with the given number of columns.
    pub fn new(n_cols: usize) -> Self {
        SparseMatrix {
            n_cols,
            indptr: vec![0],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Build a matrix from rows of `(column, value)` entries.
    ///
    /// Entries are sorted by column; explicit zeros are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use intent_featurizer::featurizer::matrix::SparseMatrix;
    ///
    /// let matrix = SparseMatrix::from_rows(3, vec![vec![(2, 1.0), (0, 0.5)], vec![]]).unwrap();
    /// assert_eq!(matrix.to_dense(), vec![vec![0.5, 0.0, 1.0], vec![0.0, 0.0, 0.0]]);
    /// ```
    pub fn from_rows(n_cols: usize, rows: Vec<Vec<(usize, f64)>>) -> Result<Self> {
        let mut matrix = SparseMatrix::new(n_cols);
        for row in rows {
            matrix.push_row(row)?;
        }
        Ok(matrix)
    }

    /// Append a row of `(column, value)` entries.
    pub fn push_row(&mut self, mut row: Vec<(usize, f64)>) -> Result<()> {
        row.sort_by_key(|(col, _)| *col);
        for window in row.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(FeaturizerError::invalid_argument(format!(
                    "Duplicate column {} in sparse row",
                    window[0].0
                )));
            }
        }
        for (col, value) in row {
            if col >= self.n_cols {
                return Err(FeaturizerError::DimensionMismatch {
                    expected: self.n_cols,
                    actual: col + 1,
                });
            }
            if value != 0.0 {
                self.indices.push(col);
                self.data.push(value);
            }
        }
        self.indptr.push(self.indices.len());
        Ok(())
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Iterate over the `(column, value)` entries of a row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.indptr[row]..self.indptr[row + 1];
        self.indices[range.clone()]
            .iter()
            .copied()
            .zip(self.data[range].iter().copied())
    }

    /// Value at `(row, col)`, zero when not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let range = self.indptr[row]..self.indptr[row + 1];
        match self.indices[range.clone()].binary_search(&col) {
            Ok(offset) => self.data[range.start + offset],
            Err(_) => 0.0,
        }
    }

    /// Sum of each column.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n_cols];
        for (col, value) in self.indices.iter().zip(&self.data) {
            sums[*col] += value;
        }
        sums
    }

    /// Keep only the given columns, in the given order.
    ///
    /// Output column `k` is input column `columns[k]`.
    pub fn select_columns(&self, columns: &[usize]) -> Result<SparseMatrix> {
        let mut positions = vec![None; self.n_cols];
        for (new_col, &col) in columns.iter().enumerate() {
            let slot = positions.get_mut(col).ok_or(FeaturizerError::DimensionMismatch {
                expected: self.n_cols,
                actual: col + 1,
            })?;
            *slot = Some(new_col);
        }

        let mut selected = SparseMatrix::new(columns.len());
        for row in 0..self.n_rows() {
            let entries: Vec<(usize, f64)> = self
                .row(row)
                .filter_map(|(col, value)| positions[col].map(|new_col| (new_col, value)))
                .collect();
            selected.push_row(entries)?;
        }
        Ok(selected)
    }

    /// Dense row-major copy of the matrix.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        (0..self.n_rows())
            .map(|row| {
                let mut dense = vec![0.0; self.n_cols];
                for (col, value) in self.row(row) {
                    dense[col] = value;
                }
                dense
            })
            .collect()
    }
}
