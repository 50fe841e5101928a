use crate::dtype::Scalar;
use crate::error::{BlasError, Result};
use crate::storage::{MatrixAccess, Operand, Sparse};

/// Borrowed matrix in compressed sparse row (CSR) form.
///
/// Row `i` owns `col_indices[row_offsets[i]..row_offsets[i + 1]]` and the
/// matching `values`. Column indices are strictly increasing within a row,
/// which [`CsrMatrix::new`] checks, so lookups can binary-search.
#[derive(Debug, Clone, Copy)]
pub struct CsrMatrix<'a, T> {
    row_offsets: &'a [usize],
    col_indices: &'a [usize],
    values: &'a [T],
    rows: usize,
    cols: usize,
}

impl<'a, T: Scalar> CsrMatrix<'a, T> {
    /// Wraps CSR arrays after checking their structure.
    ///
    /// # Errors
    /// [`BlasError::InvalidSparsity`] when the offsets are not `rows + 1`
    /// non-decreasing entries ending at `values.len()`, when indices and values
    /// differ in length, or when a row's column indices are out of range or not
    /// strictly increasing.
    pub fn new(
        rows: usize,
        cols: usize,
        row_offsets: &'a [usize],
        col_indices: &'a [usize],
        values: &'a [T],
    ) -> Result<Self> {
        if row_offsets.len().checked_sub(1) != Some(rows) {
            return Err(BlasError::sparsity(format!(
                "{} row offsets for {rows} rows",
                row_offsets.len()
            )));
        }
        if col_indices.len() != values.len() {
            return Err(BlasError::sparsity(format!(
                "{} column indices for {} values",
                col_indices.len(),
                values.len()
            )));
        }
        if row_offsets[0] != 0 || row_offsets[rows] != values.len() {
            return Err(BlasError::sparsity("row offsets must span 0..nnz"));
        }
        for (i, w) in row_offsets.windows(2).enumerate() {
            if w[0] > w[1] || w[1] > values.len() {
                return Err(BlasError::sparsity(format!("row {i} offsets out of order")));
            }
            let row = &col_indices[w[0]..w[1]];
            if row.iter().any(|&j| j >= cols) {
                return Err(BlasError::sparsity(format!("row {i} has a column >= {cols}")));
            }
            if row.windows(2).any(|p| p[0] >= p[1]) {
                return Err(BlasError::sparsity(format!(
                    "row {i} columns are not strictly increasing"
                )));
            }
        }
        Ok(Self {
            row_offsets,
            col_indices,
            values,
            rows,
            cols,
        })
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }
}

impl<T: Scalar> Operand for CsrMatrix<'_, T> {
    type Storage = Sparse;
    type Elem = T;
}

impl<T: Scalar> MatrixAccess for CsrMatrix<'_, T> {
    fn size1(&self) -> usize {
        self.rows
    }

    fn size2(&self) -> usize {
        self.cols
    }

    fn at(&self, i: usize, j: usize) -> T {
        let start = self.row_offsets[i];
        let end = self.row_offsets[i + 1];
        match self.col_indices[start..end].binary_search(&j) {
            Ok(k) => self.values[start + k],
            Err(_) => T::zero(),
        }
    }
}
