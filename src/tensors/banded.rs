use crate::dtype::Scalar;
use crate::error::{BlasError, Result};
use crate::storage::{Banded, MatrixAccess, Operand};

/// Borrowed band matrix.
///
/// Only diagonals `-lower ..= upper` are stored, row by row: row `i` holds
/// `lower + upper + 1` slots and element `(i, j)` sits in slot `j + lower - i`.
/// Slots that fall outside the matrix are never read.
///
/// A band with `lower == upper == 0` is a diagonal matrix, which is both upper
/// and lower triangular.
#[derive(Debug, Clone, Copy)]
pub struct BandedMatrix<'a, T> {
    values: &'a [T],
    rows: usize,
    cols: usize,
    lower: usize,
    upper: usize,
}

impl<'a, T: Scalar> BandedMatrix<'a, T> {
    /// Wraps band storage with `lower` sub- and `upper` super-diagonals.
    ///
    /// # Errors
    /// - [`BlasError::ExtentOverflow`] if `rows * (lower + upper + 1)` overflows
    /// - [`BlasError::BufferTooSmall`] if `values` holds fewer elements than that
    pub fn new(
        values: &'a [T],
        rows: usize,
        cols: usize,
        lower: usize,
        upper: usize,
    ) -> Result<Self> {
        let needed = lower
            .checked_add(upper)
            .and_then(|w| w.checked_add(1))
            .and_then(|w| w.checked_mul(rows))
            .ok_or(BlasError::ExtentOverflow)?;
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
            lower,
            upper,
        })
    }

    /// Square diagonal matrix holding `diagonal` on its main diagonal.
    pub fn diagonal(diagonal: &'a [T]) -> Self {
        Self {
            values: diagonal,
            rows: diagonal.len(),
            cols: diagonal.len(),
            lower: 0,
            upper: 0,
        }
    }

    /// Number of stored sub-diagonals.
    pub fn lower_bandwidth(&self) -> usize {
        self.lower
    }

    /// Number of stored super-diagonals.
    pub fn upper_bandwidth(&self) -> usize {
        self.upper
    }
}

impl<T: Scalar> Operand for BandedMatrix<'_, T> {
    type Storage = Banded;
    type Elem = T;
}

impl<T: Scalar> MatrixAccess for BandedMatrix<'_, T> {
    fn size1(&self) -> usize {
        self.rows
    }

    fn size2(&self) -> usize {
        self.cols
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> T {
        let outside = if i > j {
            i - j > self.lower
        } else {
            j - i > self.upper
        };
        if outside {
            return T::zero();
        }
        let width = self.lower + self.upper + 1;
        self.values[i * width + (self.lower + j - i)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_band_and_zero_elsewhere() {
        // [[1, 2, 0],
        //  [3, 4, 5],
        //  [0, 6, 7]]   lower = upper = 1
        let band = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 0.0];
        let m = BandedMatrix::new(&band, 3, 3, 1, 1).unwrap();
        let dense = [[1.0, 2.0, 0.0], [3.0, 4.0, 5.0], [0.0, 6.0, 7.0]];
        for (i, row) in dense.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                assert_eq!(m.at(i, j), v, "({i}, {j})");
            }
        }
    }

    #[test]
    fn diagonal_view() {
        let d = [2.0f32, 3.0];
        let m = BandedMatrix::diagonal(&d);
        assert_eq!((m.size1(), m.size2()), (2, 2));
        assert_eq!(m.at(1, 1), 3.0);
        assert_eq!(m.at(0, 1), 0.0);
        assert_eq!(m.lower_bandwidth() + m.upper_bandwidth(), 0);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let band = [0.0f64; 5];
        assert!(matches!(
            BandedMatrix::new(&band, 3, 3, 1, 0),
            Err(BlasError::BufferTooSmall { needed: 6, len: 5 })
        ));
    }

    #[test]
    fn oversized_band_is_an_error() {
        let band = [0.0f64; 4];
        assert!(matches!(
            BandedMatrix::new(&band, usize::MAX, 2, 0, 1),
            Err(BlasError::ExtentOverflow)
        ));
        assert!(matches!(
            BandedMatrix::new(&band, 1, 1, usize::MAX, 1),
            Err(BlasError::ExtentOverflow)
        ));
    }

    #[test]
    fn far_columns_read_zero() {
        let band = [2.0f64];
        let m = BandedMatrix::new(&band, 1, usize::MAX, 0, 0).unwrap();
        assert_eq!(m.at(0, 0), 2.0);
        assert_eq!(m.at(0, usize::MAX - 1), 0.0);
    }
}
