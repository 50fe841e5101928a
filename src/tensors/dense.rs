use crate::dtype::Scalar;
use crate::error::{BlasError, Result};
use crate::storage::{
    Dense, DenseMatrixStorage, DenseVectorStorage, MatrixAccess, Operand, RawMatrix, RawVectorMut,
    StorageOrder, VectorAccess, VectorAccessMut, matrix_extent, vector_extent,
};

/// Borrowed dense matrix addressed through a leading dimension.
///
/// The leading dimension may exceed the contiguous extent, which lets a view
/// describe a sub-block of a larger, padded buffer.
#[derive(Debug, Clone, Copy)]
pub struct DenseMatrix<'a, T> {
    values: &'a [T],
    rows: usize,
    cols: usize,
    ld: usize,
    order: StorageOrder,
}

impl<'a, T: Scalar> DenseMatrix<'a, T> {
    /// Wraps a tightly packed buffer.
    ///
    /// # Errors
    /// [`BlasError::BufferTooSmall`] if `values` holds fewer than `rows * cols` elements.
    pub fn new(values: &'a [T], rows: usize, cols: usize, order: StorageOrder) -> Result<Self> {
        let ld = match order {
            StorageOrder::RowMajor => cols,
            StorageOrder::ColumnMajor => rows,
        };
        Self::with_leading_dimension(values, rows, cols, ld.max(1), order)
    }

    /// Wraps a tightly packed row-major buffer.
    pub fn row_major(values: &'a [T], rows: usize, cols: usize) -> Result<Self> {
        Self::new(values, rows, cols, StorageOrder::RowMajor)
    }

    /// Wraps a tightly packed column-major buffer.
    pub fn column_major(values: &'a [T], rows: usize, cols: usize) -> Result<Self> {
        Self::new(values, rows, cols, StorageOrder::ColumnMajor)
    }

    /// Wraps a buffer with an explicit leading dimension.
    ///
    /// # Errors
    /// - [`BlasError::LeadingDimension`] if `ld` is smaller than the contiguous
    ///   extent (columns for row-major, rows for column-major) or zero
    /// - [`BlasError::ExtentOverflow`] if the described matrix cannot be addressed
    /// - [`BlasError::BufferTooSmall`] if the described matrix runs past `values`
    pub fn with_leading_dimension(
        values: &'a [T],
        rows: usize,
        cols: usize,
        ld: usize,
        order: StorageOrder,
    ) -> Result<Self> {
        let min = match order {
            StorageOrder::RowMajor => cols,
            StorageOrder::ColumnMajor => rows,
        }
        .max(1);
        if ld < min {
            return Err(BlasError::LeadingDimension { ld, min });
        }
        let needed = matrix_extent(rows, cols, ld, order).ok_or(BlasError::ExtentOverflow)?;
        if values.len() < needed {
            return Err(BlasError::BufferTooSmall {
                needed,
                len: values.len(),
            });
        }
        Ok(Self {
            values,
            rows,
            cols,
            ld,
            order,
        })
    }

    /// Memory order of the view.
    pub fn order(&self) -> StorageOrder {
        self.order
    }

    /// Leading dimension of the view.
    pub fn leading_dimension(&self) -> usize {
        self.ld
    }
}

impl<T: Scalar> Operand for DenseMatrix<'_, T> {
    type Storage = Dense;
    type Elem = T;
}

impl<T: Scalar> MatrixAccess for DenseMatrix<'_, T> {
    fn size1(&self) -> usize {
        self.rows
    }

    fn size2(&self) -> usize {
        self.cols
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> T {
        self.values[self.order.index(i, j, self.ld)]
    }
}

impl<T: Scalar> DenseMatrixStorage for DenseMatrix<'_, T> {
    fn raw(&self) -> RawMatrix<'_, T> {
        RawMatrix {
            values: self.values,
            size1: self.rows,
            size2: self.cols,
            leading_dimension: self.ld,
            order: self.order,
        }
    }
}

/// Borrowed, mutable, strided dense vector.
#[derive(Debug)]
pub struct DenseVector<'a, T> {
    values: &'a mut [T],
    len: usize,
    stride: usize,
}

impl<'a, T: Scalar> DenseVector<'a, T> {
    /// Wraps a contiguous buffer; every element belongs to the vector.
    pub fn new(values: &'a mut [T]) -> Self {
        let len = values.len();
        Self {
            values,
            len,
            stride: 1,
        }
    }

    /// Wraps every `stride`-th element of `values`, starting at the first.
    ///
    /// # Errors
    /// - [`BlasError::InvalidStride`] if `stride` is zero
    /// - [`BlasError::ExtentOverflow`] if the last element cannot be addressed
    /// - [`BlasError::BufferTooSmall`] if the last element lies past `values`
    pub fn strided(values: &'a mut [T], len: usize, stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(BlasError::InvalidStride);
        }
        let needed = vector_extent(len, stride).ok_or(BlasError::ExtentOverflow)?;
        if values.len() < needed {
            return Err(BlasError::BufferTooSmall {
                needed,
                len: values.len(),
            });
        }
        Ok(Self {
            values,
            len,
            stride,
        })
    }

    /// Distance between consecutive elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Copies the logical elements out, skipping stride gaps.
    pub fn to_vec(&self) -> Vec<T> {
        (0..self.len).map(|i| self.values[i * self.stride]).collect()
    }
}

impl<T: Scalar> Operand for DenseVector<'_, T> {
    type Storage = Dense;
    type Elem = T;
}

impl<T: Scalar> VectorAccess for DenseVector<'_, T> {
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn get(&self, i: usize) -> T {
        self.values[i * self.stride]
    }
}

impl<T: Scalar> VectorAccessMut for DenseVector<'_, T> {
    #[inline]
    fn set(&mut self, i: usize, value: T) {
        self.values[i * self.stride] = value;
    }
}

impl<T: Scalar> DenseVectorStorage for DenseVector<'_, T> {
    fn raw_mut(&mut self) -> RawVectorMut<'_, T> {
        RawVectorMut {
            values: &mut *self.values,
            size: self.len,
            stride: self.stride,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_address_the_same_matrix() {
        // [[1, 2, 3], [4, 5, 6]]
        let row = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let col = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let r = DenseMatrix::row_major(&row, 2, 3).unwrap();
        let c = DenseMatrix::column_major(&col, 2, 3).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(r.at(i, j), c.at(i, j));
            }
        }
        assert_eq!(c.leading_dimension(), 2);
    }

    #[test]
    fn padded_leading_dimension() {
        // 2x2 block inside rows of 4
        let buf = [1.0f32, 2.0, -1.0, -1.0, 3.0, 4.0];
        let m = DenseMatrix::with_leading_dimension(&buf, 2, 2, 4, StorageOrder::RowMajor).unwrap();
        assert_eq!(m.at(1, 0), 3.0);
        assert_eq!(m.raw().leading_dimension, 4);
    }

    #[test]
    fn rejects_bad_descriptors() {
        let buf = [0.0f64; 5];
        assert!(matches!(
            DenseMatrix::with_leading_dimension(&buf, 2, 3, 2, StorageOrder::RowMajor),
            Err(BlasError::LeadingDimension { ld: 2, min: 3 })
        ));
        assert!(matches!(
            DenseMatrix::row_major(&buf, 2, 3),
            Err(BlasError::BufferTooSmall { needed: 6, len: 5 })
        ));
        let mut v = [0.0f64; 4];
        assert!(matches!(
            DenseVector::strided(&mut v, 3, 0),
            Err(BlasError::InvalidStride)
        ));
        assert!(matches!(
            DenseVector::strided(&mut v, 3, 2),
            Err(BlasError::BufferTooSmall { needed: 5, len: 4 })
        ));
    }

    #[test]
    fn oversized_descriptors_are_errors() {
        let buf = [1.0f64; 16];
        let huge = usize::MAX / 2 + 1;
        assert!(matches!(
            DenseMatrix::with_leading_dimension(&buf, 3, 3, huge, StorageOrder::RowMajor),
            Err(BlasError::ExtentOverflow)
        ));
        assert!(matches!(
            DenseMatrix::with_leading_dimension(&buf, 3, 3, huge, StorageOrder::ColumnMajor),
            Err(BlasError::ExtentOverflow)
        ));
        let mut v = [0.0f64; 4];
        assert!(matches!(
            DenseVector::strided(&mut v, 3, huge),
            Err(BlasError::ExtentOverflow)
        ));
        // one element needs no stride and no leading dimension
        let one =
            DenseMatrix::with_leading_dimension(&buf[..1], 1, 1, huge, StorageOrder::RowMajor);
        assert_eq!(one.unwrap().at(0, 0), 1.0);
        assert_eq!(DenseVector::strided(&mut v, 1, huge).unwrap().to_vec(), vec![0.0]);
    }

    #[test]
    fn strided_vector_skips_gaps() {
        let mut buf = [1.0, 9.0, 2.0, 9.0, 3.0];
        let mut v = DenseVector::strided(&mut buf, 3, 2).unwrap();
        assert_eq!(v.to_vec(), vec![1.0, 2.0, 3.0]);
        v.set(1, 7.0);
        assert_eq!(buf, [1.0, 9.0, 7.0, 9.0, 3.0]);
    }
}
