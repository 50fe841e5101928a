//! Accelerated invoker.
//!
//! Bridges a pair of dense raw descriptors to one backend call: flags and
//! order go through the translator, the element type picks the entry point,
//! and the result lands in `x` in place.

use crate::backend::TrmvBackend;
use crate::ops::flags::OpFlags;
use crate::ops::translate::{BackendScalar, translate};
use crate::storage::{RawMatrix, RawVectorMut};

/// `x := op(A) x` through backend `B`.
///
/// `a` must be square with `x.size == a.size1`; the dispatcher checks that
/// before calling. A zero-sized problem returns without reaching the backend.
pub fn trmv<B: TrmvBackend, T: BackendScalar>(
    a: RawMatrix<'_, T>,
    x: RawVectorMut<'_, T>,
    flags: OpFlags,
) {
    debug_assert_eq!(a.size1, a.size2);
    debug_assert_eq!(a.size1, x.size);
    let n = a.size1;
    if n == 0 {
        return;
    }
    let params = translate(flags, a.order, B::CONVENTION);
    T::backend_trmv::<B>(params, n, a.values, a.leading_dimension, x.values, x.stride);
}
