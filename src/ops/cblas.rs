//! System CBLAS backend (`blas` feature).
//!
//! Forwards every entry point to `cblas-sys`. CBLAS takes an order code, so
//! operands reach it in their own order. Linking a provider is left to the
//! final binary (e.g. `openblas-src`); argument errors reported through the
//! provider's `xerbla` are fatal there, and the checks made before every call
//! keep them unreachable.

use crate::backend::TrmvBackend;
use crate::ops::translate::{Convention, Diag, Order, Trans, Uplo};
use cblas_sys::{CBLAS_DIAG, CBLAS_LAYOUT, CBLAS_TRANSPOSE, CBLAS_UPLO};

/// CBLAS through `cblas-sys`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cblas;

fn layout(order: Order) -> CBLAS_LAYOUT {
    match order {
        Order::RowMajor => CBLAS_LAYOUT::CblasRowMajor,
        Order::ColMajor => CBLAS_LAYOUT::CblasColMajor,
    }
}

fn uplo(uplo: Uplo) -> CBLAS_UPLO {
    match uplo {
        Uplo::Upper => CBLAS_UPLO::CblasUpper,
        Uplo::Lower => CBLAS_UPLO::CblasLower,
    }
}

fn transpose(trans: Trans) -> CBLAS_TRANSPOSE {
    match trans {
        Trans::NoTrans => CBLAS_TRANSPOSE::CblasNoTrans,
        Trans::Trans => CBLAS_TRANSPOSE::CblasTrans,
    }
}

fn diag(diag: Diag) -> CBLAS_DIAG {
    match diag {
        Diag::NonUnit => CBLAS_DIAG::CblasNonUnit,
        Diag::Unit => CBLAS_DIAG::CblasUnit,
    }
}

macro_rules! forward {
    ($name:ident, $sys:ident, $elem:ty) => {
        unsafe fn $name(
            o: Order,
            u: Uplo,
            t: Trans,
            d: Diag,
            n: i32,
            a: *const $elem,
            lda: i32,
            x: *mut $elem,
            incx: i32,
        ) {
            // SAFETY: forwarded caller contract of `TrmvBackend`.
            unsafe {
                cblas_sys::$sys(
                    layout(o),
                    uplo(u),
                    transpose(t),
                    diag(d),
                    n,
                    a.cast(),
                    lda,
                    x.cast(),
                    incx,
                )
            }
        }
    };
}

impl TrmvBackend for Cblas {
    const NAME: &'static str = "cblas";
    const CONVENTION: Convention = Convention::Any;

    forward!(strmv, cblas_strmv, f32);
    forward!(dtrmv, cblas_dtrmv, f64);
    forward!(ctrmv, cblas_ctrmv, [f32; 2]);
    forward!(ztrmv, cblas_ztrmv, [f64; 2]);
}
