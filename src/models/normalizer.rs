use crate::error::{BlasError, Result};
use crate::ops::{NonUnit, TrmvOp, Upper, trmv};
use crate::tensors::{BandedMatrix, DenseVector, Tensor};
use rayon::prelude::*;

/// Diagonal affine map `x ↦ diag(a) x + b`, applied sample by sample.
///
/// Typically used to rescale every input feature to unit variance and
/// (with an offset) zero mean. The offset is optional; without it the map is
/// purely linear and `b` takes no parameters.
///
/// # Parameters
///
/// [`parameter_vector`](Self::parameter_vector) is the diagonal followed by
/// the offset, if any.
///
/// # Example
///
/// ```rust
/// use briny_blas::models::Normalizer;
/// use briny_blas::tensors::Tensor;
///
/// let n = Normalizer::with_offset(vec![2.0, 0.5], vec![1.0, -1.0]).unwrap();
/// let out = n.eval(&Tensor::from_rows(&[vec![1.0, 4.0], vec![0.0, 0.0]])).unwrap();
/// assert_eq!(out.data, vec![3.0, 1.0, 1.0, -1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    diagonal: Vec<f64>,
    offset: Vec<f64>,
    has_offset: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(0, false)
    }
}

impl Normalizer {
    /// Identity map of the given dimension, with a zero offset if requested.
    pub fn new(dimension: usize, has_offset: bool) -> Self {
        Self {
            diagonal: vec![1.0; dimension],
            offset: if has_offset { vec![0.0; dimension] } else { Vec::new() },
            has_offset,
        }
    }

    /// Purely linear map with the given diagonal.
    pub fn from_diagonal(diagonal: Vec<f64>) -> Self {
        Self {
            diagonal,
            offset: Vec::new(),
            has_offset: false,
        }
    }

    /// Affine map with the given diagonal and offset.
    ///
    /// # Errors
    /// [`BlasError::SizeMismatch`] if the lengths differ.
    pub fn with_offset(diagonal: Vec<f64>, offset: Vec<f64>) -> Result<Self> {
        if diagonal.len() != offset.len() {
            return Err(BlasError::size_mismatch(diagonal.len(), offset.len()));
        }
        Ok(Self {
            diagonal,
            offset,
            has_offset: true,
        })
    }

    /// Class name.
    pub fn name(&self) -> &'static str {
        "Normalizer"
    }

    /// Whether the map has an offset term.
    pub fn has_offset(&self) -> bool {
        self.has_offset
    }

    /// Scaling factors.
    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    /// Offset vector; empty without an offset.
    pub fn offset(&self) -> &[f64] {
        &self.offset
    }

    /// Input dimension.
    pub fn input_size(&self) -> usize {
        self.diagonal.len()
    }

    /// Output dimension, equal to the input dimension.
    pub fn output_size(&self) -> usize {
        self.diagonal.len()
    }

    /// Number of trainable parameters.
    pub fn number_of_parameters(&self) -> usize {
        self.diagonal.len() + self.offset.len()
    }

    /// Diagonal followed by the offset.
    pub fn parameter_vector(&self) -> Vec<f64> {
        let mut params = Vec::with_capacity(self.number_of_parameters());
        params.extend_from_slice(&self.diagonal);
        params.extend_from_slice(&self.offset);
        params
    }

    /// Overwrites all parameters, in [`parameter_vector`](Self::parameter_vector) order.
    ///
    /// # Errors
    /// [`BlasError::ParameterCount`] on a length mismatch; the model is unchanged.
    pub fn set_parameter_vector(&mut self, params: &[f64]) -> Result<()> {
        let expected = self.number_of_parameters();
        if params.len() != expected {
            return Err(BlasError::ParameterCount {
                expected,
                got: params.len(),
            });
        }
        let (diagonal, offset) = params.split_at(self.diagonal.len());
        self.diagonal.copy_from_slice(diagonal);
        self.offset.copy_from_slice(offset);
        Ok(())
    }

    /// Resizes the model. Kept entries survive; new diagonal entries are one
    /// and new offset entries zero.
    pub fn set_structure(&mut self, dimension: usize, has_offset: bool) {
        self.diagonal.resize(dimension, 1.0);
        if has_offset {
            self.offset.resize(dimension, 0.0);
        } else {
            self.offset.clear();
        }
        self.has_offset = has_offset;
        log::debug!("normalizer restructured: dimension={dimension} offset={has_offset}");
    }

    /// Replaces the model by a purely linear one.
    pub fn set_diagonal(&mut self, diagonal: Vec<f64>) {
        *self = Self::from_diagonal(diagonal);
    }

    /// Replaces the model by an affine one.
    ///
    /// # Errors
    /// [`BlasError::SizeMismatch`] if the lengths differ; the model is unchanged.
    pub fn set_affine(&mut self, diagonal: Vec<f64>, offset: Vec<f64>) -> Result<()> {
        *self = Self::with_offset(diagonal, offset)?;
        Ok(())
    }

    /// Applies the map to every row of a `[batch, dimension]` tensor.
    ///
    /// Rows are independent and processed in parallel.
    ///
    /// # Errors
    /// [`BlasError::SizeMismatch`] if `input` is not 2-D or its rows do not
    /// have [`input_size`](Self::input_size) elements.
    pub fn eval(&self, input: &Tensor<f64>) -> Result<Tensor<f64>> {
        if input.shape.len() != 2 {
            return Err(BlasError::size_mismatch(2, input.shape.len()));
        }
        let dim = self.input_size();
        if input.cols() != dim {
            return Err(BlasError::size_mismatch(dim, input.cols()));
        }
        let mut out = input.clone();
        if dim == 0 {
            return Ok(out);
        }

        let scale = BandedMatrix::diagonal(&self.diagonal);
        out.data.par_chunks_mut(dim).for_each(|row| {
            // a diagonal matrix is upper triangular
            trmv(&scale, &mut DenseVector::new(row), TrmvOp::<Upper, NonUnit>::new());
            for (y, &b) in row.iter_mut().zip(&self.offset) {
                *y += b;
            }
        });
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_identity() {
        let n = Normalizer::new(3, true);
        assert_eq!(n.name(), "Normalizer");
        assert_eq!(n.diagonal(), &[1.0; 3]);
        assert_eq!(n.offset(), &[0.0; 3]);
        assert_eq!(n.number_of_parameters(), 6);
        let x = Tensor::from_rows(&[vec![1.0, -2.0, 3.5]]);
        assert_eq!(n.eval(&x).unwrap(), x);
    }

    #[test]
    fn parameters_round_trip() {
        let mut n = Normalizer::new(2, true);
        n.set_parameter_vector(&[2.0, 3.0, 0.5, -0.5]).unwrap();
        assert_eq!(n.diagonal(), &[2.0, 3.0]);
        assert_eq!(n.offset(), &[0.5, -0.5]);
        assert_eq!(n.parameter_vector(), vec![2.0, 3.0, 0.5, -0.5]);

        let err = n.set_parameter_vector(&[1.0; 3]);
        assert!(matches!(err, Err(BlasError::ParameterCount { expected: 4, got: 3 })));
        assert_eq!(n.diagonal(), &[2.0, 3.0]);
    }

    #[test]
    fn restructure_keeps_prefix() {
        let mut n = Normalizer::from_diagonal(vec![4.0, 5.0]);
        assert!(!n.has_offset());
        n.set_structure(3, true);
        assert_eq!(n.diagonal(), &[4.0, 5.0, 1.0]);
        assert_eq!(n.offset(), &[0.0; 3]);
        n.set_structure(1, false);
        assert_eq!(n.parameter_vector(), vec![4.0]);
        assert_eq!((n.input_size(), n.output_size()), (1, 1));
    }

    #[test]
    fn eval_scales_and_shifts_each_row() {
        let n = Normalizer::with_offset(vec![5.0, 6.0, 7.0], vec![1.0, 0.0, -1.0]).unwrap();
        let x = Tensor::from_rows(&[vec![1.0, 1.0, 1.0], vec![0.0, 2.0, -1.0]]);
        let y = n.eval(&x).unwrap();
        assert_eq!(y.shape, vec![2, 3]);
        assert_eq!(y.data, vec![6.0, 6.0, 6.0, 1.0, 12.0, -8.0]);
    }

    #[test]
    fn eval_checks_dimension() {
        let n = Normalizer::new(2, false);
        let x = Tensor::from_rows(&[vec![1.0, 2.0, 3.0]]);
        assert!(matches!(n.eval(&x), Err(BlasError::SizeMismatch { expected: 2, got: 3 })));
        let flat = Tensor::new(vec![2], vec![1.0, 2.0]);
        assert!(n.eval(&flat).is_err());
    }

    #[test]
    fn affine_lengths_must_match() {
        assert!(Normalizer::with_offset(vec![1.0], vec![]).is_err());
        let mut n = Normalizer::default();
        assert!(n.set_affine(vec![1.0, 2.0], vec![0.0]).is_err());
        assert_eq!(n, Normalizer::default());
        n.set_diagonal(vec![2.0]);
        assert_eq!(n.number_of_parameters(), 1);
    }
}
