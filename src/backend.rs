//! Backend selection module.
//!
//! A backend is a type implementing [`TrmvBackend`]: four positional entry
//! points, one per precision, taking the flag codes produced by the
//! translator. Which backend serves the accelerated path is fixed at compile
//! time through [`ActiveBackend`].
//!
//! # Supported Backends
//!
//! - `Reference` - pure Rust column-sweep kernels (default).
//! - `Cblas` - the system CBLAS through `cblas-sys`, enabled by the `blas`
//!   feature. The final binary must link a provider (OpenBLAS, MKL, ...).

use crate::ops::translate::{Convention, Diag, Order, Trans, Uplo};
use core::fmt;

/// Positional triangular matrix-vector entry points of a BLAS-like library.
///
/// Every function computes `x := op(A) x` for an `n x n` triangular `A`.
///
/// # Safety
/// Callers must uphold, for every entry point:
/// - `n >= 0`, `lda >= max(1, n)`, `incx >= 1`
/// - `a` is valid for reads of the `(n - 1) * lda + n` elements the matrix
///   addresses, and `x` for reads and writes of `(n - 1) * incx + 1` elements
/// - the two buffers do not overlap
#[allow(clippy::too_many_arguments)]
pub trait TrmvBackend {
    /// Label used in logs.
    const NAME: &'static str;
    /// Storage orders the entry points accept.
    const CONVENTION: Convention;

    /// Single-precision real.
    unsafe fn strmv(
        order: Order,
        uplo: Uplo,
        trans: Trans,
        diag: Diag,
        n: i32,
        a: *const f32,
        lda: i32,
        x: *mut f32,
        incx: i32,
    );

    /// Double-precision real.
    unsafe fn dtrmv(
        order: Order,
        uplo: Uplo,
        trans: Trans,
        diag: Diag,
        n: i32,
        a: *const f64,
        lda: i32,
        x: *mut f64,
        incx: i32,
    );

    /// Single-precision complex, interleaved `[re, im]`.
    unsafe fn ctrmv(
        order: Order,
        uplo: Uplo,
        trans: Trans,
        diag: Diag,
        n: i32,
        a: *const [f32; 2],
        lda: i32,
        x: *mut [f32; 2],
        incx: i32,
    );

    /// Double-precision complex, interleaved `[re, im]`.
    unsafe fn ztrmv(
        order: Order,
        uplo: Uplo,
        trans: Trans,
        diag: Diag,
        n: i32,
        a: *const [f64; 2],
        lda: i32,
        x: *mut [f64; 2],
        incx: i32,
    );
}

/// Enumeration of the backends this crate can be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Pure Rust kernels (default).
    #[default]
    Reference,
    /// System CBLAS.
    Cblas,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reference => crate::ops::reference::Reference::NAME,
            Self::Cblas => "cblas",
        })
    }
}

/// Backend serving the accelerated path in this build.
#[cfg(not(feature = "blas"))]
pub type ActiveBackend = crate::ops::reference::Reference;

/// Backend serving the accelerated path in this build.
#[cfg(feature = "blas")]
pub type ActiveBackend = crate::ops::cblas::Cblas;

/// Returns the backend compiled into this build.
///
/// # Example
///
/// ```
/// use briny_blas::backend::{Backend, active_backend};
/// let backend = active_backend();
/// assert_eq!(backend == Backend::Cblas, cfg!(feature = "blas"));
/// ```
pub const fn active_backend() -> Backend {
    if cfg!(feature = "blas") {
        Backend::Cblas
    } else {
        Backend::Reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(Backend::default(), Backend::Reference);
        assert_eq!(Backend::Reference.to_string(), "reference");
        assert_eq!(Backend::Cblas.to_string(), "cblas");
    }

    #[test]
    fn active_matches_alias() {
        assert_eq!(active_backend().to_string(), ActiveBackend::NAME);
    }
}
