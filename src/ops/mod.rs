//! # Operation Dispatch Layer
//!
//! Triangular matrix-vector products routed either to an accelerated BLAS
//! backend or to a generic CPU kernel, decided at compile time from the
//! operand types.
//!
//! ## Submodules
//!
//! - [`flags`] - semantic flags and the zero-sized [`TrmvOp`] tag carrying them
//! - [`capability`] - the registry mapping operand types to a kernel path
//! - [`translate`] - flags and storage order to backend parameter codes
//! - [`invoke`] - one backend call for a pair of dense descriptors
//! - [`cpu`] - the storage-agnostic fallback kernel
//! - [`reference`] - pure Rust backend (default)
//! - `cblas` *(feature `blas`)* - system CBLAS backend
//! - [`dispatch`] - the public [`trmv`] / [`try_trmv`] entry points
//!
//! ## Example
//!
//! ```rust
//! use briny_blas::ops::{has_optimized_trmv, trmv, Lower, NonUnit, TrmvOp};
//! use briny_blas::tensors::{DenseMatrix, DenseVector};
//!
//! let a = [1.0f32, 0.0, 0.0, 2.0, 1.0, 0.0, 3.0, 4.0, 1.0];
//! let a = DenseMatrix::row_major(&a, 3, 3).unwrap();
//! let mut x = [1.0f32, 1.0, 1.0];
//! trmv(&a, &mut DenseVector::new(&mut x), TrmvOp::<Lower, NonUnit>::new());
//! assert_eq!(x, [1.0, 3.0, 8.0]);
//! assert!(has_optimized_trmv::<DenseMatrix<f32>, DenseVector<f32>>());
//! ```
//!
//! ## Extending
//!
//! A new backend implements [`TrmvBackend`](crate::backend::TrmvBackend).
//! A new storage kind adds a marker, its operand types, and its rows in
//! [`capability`]; nothing else changes.
//!
//! ## Feature Flags
//!
//! - `blas` - route the accelerated path to the system CBLAS

pub mod capability;
#[cfg(feature = "blas")]
pub mod cblas;
pub mod cpu;
pub mod dispatch;
pub mod flags;
pub mod invoke;
pub mod reference;
pub mod translate;

pub use capability::{
    Accelerated, Fallback, KernelPath, TrmvCapability, TrmvPathOf, has_optimized_trmv,
};
pub use dispatch::{TrmvPath, check_trmv, trmv, try_trmv};
pub use flags::{
    Diagonal, Lower, NoTrans, NonUnit, OpFlags, OperationTag, Trans, Transpose, Triangle, TrmvOp,
    Unit, Upper,
};
