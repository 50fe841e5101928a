//! Operand views and batch containers.
//!
//! # Operand Views
//!
//! The kernels never own memory. Callers wrap their own buffers in a borrowed
//! view that records how the elements are laid out:
//!
//! - [`DenseMatrix`] - leading-dimension addressed, row- or column-major
//! - [`DenseVector`] - strided, mutable (trmv writes its result in place)
//! - [`BandedMatrix`] - a band of diagonals around the main diagonal
//! - [`CsrMatrix`] - compressed sparse rows
//!
//! Constructors validate the descriptor against the buffer once, so the
//! kernels can index without re-checking extents.
//!
//! # Batches
//!
//! [`Tensor`] is the owned, row-major container the models consume and produce.
//!
//! ## Example
//!
//! ```rust
//! use briny_blas::tensors::{DenseMatrix, DenseVector};
//! use briny_blas::ops::{trmv, Lower, NonUnit, TrmvOp};
//!
//! let a = [2.0f64, 0.0, 1.0, 3.0];
//! let mut x = [1.0f64, 1.0];
//! let a = DenseMatrix::row_major(&a, 2, 2).unwrap();
//! trmv(&a, &mut DenseVector::new(&mut x), TrmvOp::<Lower, NonUnit>::new());
//! assert_eq!(x, [2.0, 4.0]);
//! ```

mod banded;
mod dense;
mod sparse;

pub use banded::BandedMatrix;
pub use dense::{DenseMatrix, DenseVector};
pub use sparse::CsrMatrix;

/// An N-dimensional array with a shape and flat row-major data.
///
/// Models treat a `[batch, dimension]` tensor as one sample per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    /// Extent of every axis.
    pub shape: Vec<usize>,
    /// Elements in row-major order.
    pub data: Vec<T>,
}

impl<T> Tensor<T> {
    /// Creates a tensor from a shape and flat data.
    ///
    /// # Panics
    /// Panics if the number of elements in `data` does not match the shape product.
    pub fn new(shape: impl Into<Vec<usize>>, data: Vec<T>) -> Self {
        let shape = shape.into();
        assert_eq!(
            shape.iter().product::<usize>(),
            data.len(),
            "shape {:?} is incompatible with {} data elements",
            shape,
            data.len()
        );
        Self { shape, data }
    }

    /// Number of rows of a 2-D tensor (the batch size).
    ///
    /// # Panics
    /// Panics if the tensor is not 2-D.
    pub fn rows(&self) -> usize {
        assert_eq!(self.shape.len(), 2, "expected a 2-D tensor");
        self.shape[0]
    }

    /// Number of columns of a 2-D tensor (the sample dimension).
    ///
    /// # Panics
    /// Panics if the tensor is not 2-D.
    pub fn cols(&self) -> usize {
        assert_eq!(self.shape.len(), 2, "expected a 2-D tensor");
        self.shape[1]
    }
}

impl<T: Clone> Tensor<T> {
    /// Stacks equally long rows into a `[rows, dimension]` tensor.
    ///
    /// # Panics
    /// Panics on ragged rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        let dim = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == dim),
            "ragged rows (rows have mismatched lengths)"
        );
        let data = rows.iter().flat_map(|r| r.iter().cloned()).collect();
        Self::new(vec![rows.len(), dim], data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_panics() {
        let result = std::panic::catch_unwind(|| {
            Tensor::new(vec![2, 2], vec![1.0, 2.0, 3.0]);
        });
        assert!(result.is_err());
    }

    #[test]
    fn from_rows_stacks() {
        let t = Tensor::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!(t.shape, vec![3, 2]);
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
