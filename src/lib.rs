//! briny_blas: compile-time dispatch for triangular matrix-vector products.
//!
//! `x := op(A) x` with `A` triangular, over any combination of matrix and
//! vector storage. Dense operands of a single BLAS precision go to an
//! accelerated backend; everything else runs a generic kernel that only needs
//! element access. The choice is made by the compiler from the operand types,
//! never at runtime.
//!
//! # Features
//!
//! - Dense (row- or column-major, padded leading dimension), banded and CSR
//!   sparse matrices; strided dense vectors.
//! - `f32`, `f64`, [`Complex64`](dtype::Complex64) and
//!   [`Complex128`](dtype::Complex128) elements.
//! - A pure Rust reference backend, or the system CBLAS with the `blas` feature.
//! - A diagonal [`Normalizer`](models::Normalizer) model and its persistence.
//!
//! # Modules
//!
//! - [`dtype`] - element types and precision tags.
//! - [`storage`] - storage classification and access protocols.
//! - [`tensors`] - borrowed operand views and the owned batch container.
//! - [`ops`] - the dispatcher, its registry, flag translation and kernels.
//! - [`backend`] - the backend interface and the compiled-in backend.
//! - [`models`] - models built on the kernels.
//! - [`modelio`] - saving/loading of model parameters.
//! - [`approx`] - precision-aware approximate comparison.
//! - [`error`] - the crate error type.
//!
//! # Example
//!
//! ```rust
//! use briny_blas::ops::{trmv, NonUnit, Trans, TrmvOp, Upper};
//! use briny_blas::tensors::{DenseMatrix, DenseVector};
//!
//! // [[5, 1, 2], [0, 6, 3], [0, 0, 7]]
//! let a = [5.0f64, 1.0, 2.0, 0.0, 6.0, 3.0, 0.0, 0.0, 7.0];
//! let a = DenseMatrix::row_major(&a, 3, 3).unwrap();
//! let mut x = [1.0f64, 1.0, 1.0];
//! trmv(&a, &mut DenseVector::new(&mut x), TrmvOp::<Upper, NonUnit, Trans>::new());
//! assert_eq!(x, [5.0, 7.0, 12.0]);
//! ```

#![warn(missing_docs)]

pub mod approx;
pub mod backend;
pub mod dtype;
pub mod error;
pub mod modelio;
pub mod models;
pub mod ops;
pub mod storage;
pub mod tensors;

pub use error::{BlasError, Result};
