//! Models built on the triangular kernels.
//!
//! - [`Normalizer`] - diagonal affine rescaling of feature vectors

mod normalizer;

pub use normalizer::Normalizer;
