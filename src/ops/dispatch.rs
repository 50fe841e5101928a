//! Operation Dispatch Layer
//!
//! Single entry point for `x := op(A) x` over any operand pair. The kernel is
//! chosen by the capability registry from the operand types alone:
//!
//! 1. dense operands of one backend precision go through the flag translator
//!    to [`ActiveBackend`]
//! 2. everything else runs the generic kernel in [`cpu`](super::cpu)
//!
//! Both paths compute the same product, up to floating-point rounding, and a
//! given call site always takes the same path.
//!
//! # Example
//! ```rust
//! use briny_blas::ops::{has_optimized_trmv, trmv, Lower, Trans, TrmvOp, Unit};
//! use briny_blas::tensors::{BandedMatrix, DenseVector};
//!
//! let d = [5.0f64, 6.0, 7.0];
//! let a = BandedMatrix::diagonal(&d);
//! let mut x = [1.0f64, 1.0, 1.0];
//! trmv(&a, &mut DenseVector::new(&mut x), TrmvOp::<Lower, Unit, Trans>::new());
//! assert_eq!(x, [1.0, 1.0, 1.0]);
//! assert!(!has_optimized_trmv::<BandedMatrix<f64>, DenseVector<f64>>());
//! ```

use crate::backend::{ActiveBackend, TrmvBackend};
use crate::dtype::{FromElement, Scalar};
use crate::error::{BlasError, Result};
use crate::ops::capability::{Accelerated, Fallback, KernelPath, TrmvCapability, TrmvPathOf};
use crate::ops::flags::{OpFlags, OperationTag};
use crate::ops::translate::BackendScalar;
use crate::ops::{cpu, invoke};
use crate::storage::{
    DenseMatrixStorage, DenseVectorStorage, MatrixAccess, StorageTag, VectorAccess, VectorAccessMut,
};

/// A kernel path able to run `trmv` on `M` and `V`.
pub trait TrmvPath<M, V> {
    /// Checks what this path needs beyond [`check_trmv`]; runs after it.
    fn check(_a: &M, _x: &mut V) -> Result<()> {
        Ok(())
    }

    /// Runs the product; preconditions are already checked.
    fn run(a: &M, x: &mut V, flags: OpFlags);
}

impl<M, V> TrmvPath<M, V> for Fallback
where
    M: MatrixAccess,
    V: VectorAccessMut,
    V::Elem: FromElement<M::Elem>,
{
    #[inline]
    fn run(a: &M, x: &mut V, flags: OpFlags) {
        cpu::trmv(a, x, flags);
    }
}

impl<M, V> TrmvPath<M, V> for Accelerated
where
    M: DenseMatrixStorage,
    M::Elem: BackendScalar,
    V: DenseVectorStorage<Elem = M::Elem>,
{
    /// The backend takes the leading dimension and stride as `i32`. Neither
    /// is used when `n <= 1`.
    fn check(a: &M, x: &mut V) -> Result<()> {
        if a.size1() <= 1 {
            return Ok(());
        }
        let lda = a.raw().leading_dimension;
        let incx = x.raw_mut().stride;
        for dim in [lda, incx] {
            if i32::try_from(dim).is_err() {
                return Err(BlasError::DimensionOverflow { dim });
            }
        }
        Ok(())
    }

    #[inline]
    fn run(a: &M, x: &mut V, flags: OpFlags) {
        invoke::trmv::<ActiveBackend, M::Elem>(a.raw(), x.raw_mut(), flags);
    }
}

/// Checks the shape preconditions of `trmv`.
///
/// # Errors
/// - [`BlasError::NotSquare`] if `a` is not square
/// - [`BlasError::SizeMismatch`] if `x.len()` differs from the columns of `a`
/// - [`BlasError::DimensionOverflow`] if the dimension does not fit `i32`
///
/// [`trmv`] and [`try_trmv`] additionally reject a dense leading dimension or
/// vector stride that the backend cannot take.
pub fn check_trmv<M: MatrixAccess, V: VectorAccess>(a: &M, x: &V) -> Result<()> {
    let (rows, cols) = (a.size1(), a.size2());
    if rows != cols {
        return Err(BlasError::NotSquare { rows, cols });
    }
    if x.len() != cols {
        return Err(BlasError::size_mismatch(cols, x.len()));
    }
    if i32::try_from(rows).is_err() {
        return Err(BlasError::DimensionOverflow { dim: rows });
    }
    Ok(())
}

/// Triangular matrix-vector product `x := op(A) x`, in place.
///
/// `op` only carries its type: `TrmvOp::<Upper, NonUnit, Trans>::new()`
/// selects the upper triangle, the stored diagonal and `op(A) = Aᵀ`.
///
/// # Panics
/// If `a` is not square, `x` does not match it, or a dimension passed to the
/// backend exceeds `i32::MAX`. Use [`try_trmv`] to get these as errors.
pub fn trmv<M, V, Op>(a: &M, x: &mut V, op: Op)
where
    M: MatrixAccess,
    V: VectorAccessMut,
    Op: OperationTag,
    (M::Storage, V::Storage, M::Elem, V::Elem): TrmvCapability,
    TrmvPathOf<M, V>: TrmvPath<M, V>,
{
    if let Err(err) = check(a, x) {
        panic!("trmv: {err}");
    }
    run(a, x, op);
}

/// Like [`trmv`], reporting precondition failures instead of panicking.
///
/// # Errors
/// See [`check_trmv`], plus [`BlasError::DimensionOverflow`] for a dense
/// leading dimension or stride beyond `i32::MAX` when `n >= 2`. `x` is
/// untouched on error.
pub fn try_trmv<M, V, Op>(a: &M, x: &mut V, op: Op) -> Result<()>
where
    M: MatrixAccess,
    V: VectorAccessMut,
    Op: OperationTag,
    (M::Storage, V::Storage, M::Elem, V::Elem): TrmvCapability,
    TrmvPathOf<M, V>: TrmvPath<M, V>,
{
    check(a, x)?;
    run(a, x, op);
    Ok(())
}

fn check<M, V>(a: &M, x: &mut V) -> Result<()>
where
    M: MatrixAccess,
    V: VectorAccessMut,
    (M::Storage, V::Storage, M::Elem, V::Elem): TrmvCapability,
    TrmvPathOf<M, V>: TrmvPath<M, V>,
{
    check_trmv(a, x)?;
    <TrmvPathOf<M, V> as TrmvPath<M, V>>::check(a, x)
}

fn run<M, V, Op>(a: &M, x: &mut V, _op: Op)
where
    M: MatrixAccess,
    V: VectorAccessMut,
    Op: OperationTag,
    (M::Storage, V::Storage, M::Elem, V::Elem): TrmvCapability,
    TrmvPathOf<M, V>: TrmvPath<M, V>,
{
    log::trace!(
        "trmv {} n={} {}<{}> x {}<{}> via {} ({})",
        Op::FLAGS,
        a.size1(),
        <M::Storage as StorageTag>::KIND,
        <M::Elem as Scalar>::ELEMENT,
        <V::Storage as StorageTag>::KIND,
        <V::Elem as Scalar>::ELEMENT,
        <TrmvPathOf<M, V> as KernelPath>::NAME,
        ActiveBackend::NAME,
    );
    <TrmvPathOf<M, V> as TrmvPath<M, V>>::run(a, x, Op::FLAGS);
}
