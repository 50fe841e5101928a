//! Generic CPU kernel
//!
//! # Fallback Path
//!
//! Computes `x := op(A) x` for any matrix implementing [`MatrixAccess`] and any
//! vector implementing [`VectorAccessMut`], using nothing but element reads
//! and writes. This is what runs for banded and sparse matrices, for mixed
//! precisions, and for any other combination the backend has no kernel for.
//!
//! ## Traversal
//!
//! The product is computed in place, one output element at a time, so each
//! `x[i]` must be written only after every read of its old value:
//!
//! - upper `op(A)`: `x[i]` depends on `x[i..]`, rows go top to bottom
//! - lower `op(A)`: `x[i]` depends on `x[..=i]`, rows go bottom to top
//!
//! `op(A)` is upper when the stored triangle is upper and not transposed, or
//! lower and transposed.
//!
//! ## Diagonal
//!
//! A unit diagonal contributes `x[i]` itself; the stored diagonal is never
//! read. A non-unit diagonal contributes `A[i][i] * x[i]`.
//!
//! ## Precision
//!
//! Matrix elements are converted into the vector's element type with
//! [`FromElement`] before multiplying, and the product accumulates in the
//! vector's precision. A real matrix may update a vector of any precision; a
//! complex matrix only a complex one.

use crate::dtype::FromElement;
use crate::ops::flags::OpFlags;
use crate::storage::{MatrixAccess, VectorAccessMut};

/// In-place triangular matrix-vector product over element accessors.
///
/// `a` must be square and `x.len() == a.size2()`.
pub fn trmv<M, V>(a: &M, x: &mut V, flags: OpFlags)
where
    M: MatrixAccess,
    V: VectorAccessMut,
    V::Elem: FromElement<M::Elem>,
{
    let n = a.size1();
    let transposed = flags.is_transposed();
    let unit = flags.is_unit();
    let elem = |i: usize, j: usize| -> V::Elem {
        if transposed {
            V::Elem::from_element(a.at(j, i))
        } else {
            V::Elem::from_element(a.at(i, j))
        }
    };

    if flags.effective_upper() {
        for i in 0..n {
            let mut acc = if unit { x.get(i) } else { elem(i, i) * x.get(i) };
            for j in i + 1..n {
                acc = acc + elem(i, j) * x.get(j);
            }
            x.set(i, acc);
        }
    } else {
        for i in (0..n).rev() {
            let mut acc = if unit { x.get(i) } else { elem(i, i) * x.get(i) };
            for j in 0..i {
                acc = acc + elem(i, j) * x.get(j);
            }
            x.set(i, acc);
        }
    }
}
