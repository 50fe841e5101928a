//! Pure Rust backend.
//!
//! Implements the [`TrmvBackend`] entry points with the classic column-sweep
//! loops of the Fortran reference BLAS. Like Fortran BLAS it works on
//! column-major data only, so it advertises
//! `Convention::Native(StorageOrder::ColumnMajor)` and relies on the flag
//! translator to fold row-major operands into it. It still honours a
//! row-major order code by folding it the same way, which keeps it usable as
//! a drop-in CBLAS stand-in.

use crate::backend::TrmvBackend;
use crate::dtype::{Complex64, Complex128, Scalar};
use crate::ops::translate::{Convention, Diag, Order, Trans, Uplo};
use crate::storage::StorageOrder;

/// The pure Rust backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reference;

/// `x := op(A) x` on column-major (or order-folded) data.
///
/// # Safety
/// See [`TrmvBackend`].
#[allow(clippy::too_many_arguments)]
unsafe fn column_sweep<T: Scalar>(
    order: Order,
    uplo: Uplo,
    trans: Trans,
    diag: Diag,
    n: i32,
    a: *const T,
    lda: i32,
    x: *mut T,
    incx: i32,
) {
    debug_assert!(lda >= n.max(1) && incx >= 1);
    if n <= 0 {
        return;
    }
    let (n, lda, incx) = (n as usize, lda as usize, incx as usize);
    // SAFETY: the caller guarantees these extents are valid and disjoint.
    let a = unsafe { core::slice::from_raw_parts(a, (n - 1) * lda + n) };
    let x = unsafe { core::slice::from_raw_parts_mut(x, (n - 1) * incx + 1) };

    // a row-major A is the column-major Aᵀ
    let (uplo, trans) = match order {
        Order::ColMajor => (uplo, trans),
        Order::RowMajor => (uplo.flipped(), trans.toggled()),
    };
    let nounit = diag == Diag::NonUnit;
    let at = |i: usize, j: usize| a[j * lda + i];
    let zero = T::zero();

    match (trans, uplo) {
        (Trans::NoTrans, Uplo::Upper) => {
            for j in 0..n {
                let xj = x[j * incx];
                if xj != zero {
                    for i in 0..j {
                        x[i * incx] = x[i * incx] + xj * at(i, j);
                    }
                    if nounit {
                        x[j * incx] = xj * at(j, j);
                    }
                }
            }
        }
        (Trans::NoTrans, Uplo::Lower) => {
            for j in (0..n).rev() {
                let xj = x[j * incx];
                if xj != zero {
                    for i in (j + 1..n).rev() {
                        x[i * incx] = x[i * incx] + xj * at(i, j);
                    }
                    if nounit {
                        x[j * incx] = xj * at(j, j);
                    }
                }
            }
        }
        (Trans::Trans, Uplo::Upper) => {
            for j in (0..n).rev() {
                let mut temp = x[j * incx];
                if nounit {
                    temp = temp * at(j, j);
                }
                for i in (0..j).rev() {
                    temp = temp + at(i, j) * x[i * incx];
                }
                x[j * incx] = temp;
            }
        }
        (Trans::Trans, Uplo::Lower) => {
            for j in 0..n {
                let mut temp = x[j * incx];
                if nounit {
                    temp = temp * at(j, j);
                }
                for i in j + 1..n {
                    temp = temp + at(i, j) * x[i * incx];
                }
                x[j * incx] = temp;
            }
        }
    }
}

impl TrmvBackend for Reference {
    const NAME: &'static str = "reference";
    const CONVENTION: Convention = Convention::Native(StorageOrder::ColumnMajor);

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
    ) {
        unsafe { column_sweep(order, uplo, trans, diag, n, a, lda, x, incx) }
    }

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
    ) {
        unsafe { column_sweep(order, uplo, trans, diag, n, a, lda, x, incx) }
    }

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
    ) {
        // Complex64 is layout-identical to [f32; 2]
        unsafe {
            column_sweep(
                order,
                uplo,
                trans,
                diag,
                n,
                a.cast::<Complex64>(),
                lda,
                x.cast::<Complex64>(),
                incx,
            )
        }
    }

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
    ) {
        unsafe {
            column_sweep(
                order,
                uplo,
                trans,
                diag,
                n,
                a.cast::<Complex128>(),
                lda,
                x.cast::<Complex128>(),
                incx,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(order: Order, uplo: Uplo, trans: Trans, diag: Diag, a: &[f64], x: &mut [f64]) {
        let n = x.len() as i32;
        let (a, lda, x) = (a.as_ptr(), n.max(1), x.as_mut_ptr());
        unsafe { Reference::dtrmv(order, uplo, trans, diag, n, a, lda, x, 1) }
    }

    #[test]
    fn column_major_lower_unit() {
        // [[1, 0, 0], [2, 1, 0], [3, 4, 1]] stored by columns
        let a = [1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 0.0, 0.0, 1.0];
        let mut x = [1.0, 1.0, 1.0];
        call(Order::ColMajor, Uplo::Lower, Trans::NoTrans, Diag::Unit, &a, &mut x);
        assert_eq!(x, [1.0, 3.0, 8.0]);
    }

    #[test]
    fn row_major_code_is_folded() {
        // same matrix stored by rows
        let a = [1.0, 0.0, 0.0, 2.0, 1.0, 0.0, 3.0, 4.0, 1.0];
        let mut x = [1.0, 1.0, 1.0];
        call(Order::RowMajor, Uplo::Lower, Trans::NoTrans, Diag::Unit, &a, &mut x);
        assert_eq!(x, [1.0, 3.0, 8.0]);

        let mut y = [1.0, 1.0, 1.0];
        call(Order::RowMajor, Uplo::Lower, Trans::Trans, Diag::NonUnit, &a, &mut y);
        assert_eq!(y, [6.0, 5.0, 1.0]);
    }

    #[test]
    fn unit_diagonal_is_not_read() {
        let a = [f64::NAN, 0.0, 2.0, f64::NAN];
        let mut x = [1.0, 1.0];
        call(Order::ColMajor, Uplo::Upper, Trans::NoTrans, Diag::Unit, &a, &mut x);
        assert_eq!(x, [3.0, 1.0]);
    }

    #[test]
    fn strided_vector() {
        let a = [2.0f32, 0.0, 1.0, 3.0];
        let mut x = [1.0f32, -9.0, 1.0];
        unsafe {
            Reference::strmv(
                Order::ColMajor,
                Uplo::Upper,
                Trans::Trans,
                Diag::NonUnit,
                2,
                a.as_ptr(),
                2,
                x.as_mut_ptr(),
                2,
            );
        }
        assert_eq!(x, [2.0, -9.0, 4.0]);
    }

    #[test]
    fn empty_is_a_no_op() {
        let mut x: [f64; 0] = [];
        call(Order::ColMajor, Uplo::Upper, Trans::NoTrans, Diag::NonUnit, &[], &mut x);
    }
}
