//! Error types for briny_blas

use briny::prelude::ValidationError;
use thiserror::Error;

/// Result type alias using [`BlasError`]
pub type Result<T> = std::result::Result<T, BlasError>;

/// Errors reported by operand construction, precondition checks and the
/// consumer models.
#[derive(Error, Debug)]
pub enum BlasError {
    /// A triangular operand is not square
    #[error("triangular operand must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// Operand sizes do not line up
    #[error("size mismatch: expected {expected}, got {got}")]
    SizeMismatch {
        /// Size required by the other operand
        expected: usize,
        /// Size actually supplied
        got: usize,
    },

    /// Leading dimension smaller than the contiguous extent
    #[error("leading dimension {ld} is smaller than the minimum {min}")]
    LeadingDimension {
        /// Supplied leading dimension
        ld: usize,
        /// Smallest valid leading dimension
        min: usize,
    },

    /// Borrowed buffer cannot hold the described operand
    #[error("buffer of {len} elements is too small, {needed} required")]
    BufferTooSmall {
        /// Elements the descriptor addresses
        needed: usize,
        /// Elements in the buffer
        len: usize,
    },

    /// Described operand addresses more elements than `usize` can count
    #[error("operand extent overflows the address range")]
    ExtentOverflow,

    /// Vector stride of zero
    #[error("vector stride must be at least 1")]
    InvalidStride,

    /// A dimension does not fit the backend's integer type
    #[error("dimension {dim} exceeds the backend integer range")]
    DimensionOverflow {
        /// Offending dimension
        dim: usize,
    },

    /// Malformed compressed sparse structure
    #[error("invalid sparse structure: {reason}")]
    InvalidSparsity {
        /// What is wrong with it
        reason: String,
    },

    /// Parameter vector of the wrong length
    #[error("expected {expected} parameters, got {got}")]
    ParameterCount {
        /// Parameters the model holds
        expected: usize,
        /// Parameters supplied
        got: usize,
    },

    /// Data rejected by a `briny` validation gate
    #[error("validation failed: {0}")]
    Validation(ValidationError),
}

impl From<ValidationError> for BlasError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl BlasError {
    /// Create a size mismatch error
    pub fn size_mismatch(expected: usize, got: usize) -> Self {
        Self::SizeMismatch { expected, got }
    }

    /// Create a sparse structure error
    pub fn sparsity(reason: impl Into<String>) -> Self {
        Self::InvalidSparsity {
            reason: reason.into(),
        }
    }
}
