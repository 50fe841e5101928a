//! Flag translator.
//!
//! Turns semantic [`OpFlags`] plus an operand's [`StorageOrder`] into the
//! positional parameter set a backend entry point takes, and picks the entry
//! point for the element precision.
//!
//! ## Encoding
//!
//! Parameters use the CBLAS numeric codes (`101`/`102` order, `121`/`122`
//! triangle, `111`/`112` transpose, `131`/`132` diagonal), so a CBLAS backend
//! can forward them untouched.
//!
//! ## Storage order
//!
//! A backend that takes an order code ([`Convention::Any`]) gets the operand's
//! own order. A backend fixed to one order ([`Convention::Native`]) reads a
//! foreign-order buffer as the transpose of the matrix, so the translator
//! inverts the triangle and toggles the transpose:
//! `op(A) x` on a row-major `A` is `op'(B) x` on the column-major `B = Aᵀ`.
//!
//! ## Complex buffers
//!
//! Complex operands cross into the backend through [`native_view`] and
//! [`native_view_mut`], the only place element buffers change type. Both are
//! `bytemuck` casts between layout-identical `Pod` types; the static
//! assertions below pin that layout.

use crate::backend::TrmvBackend;
use crate::dtype::{Complex64, Complex128, Scalar};
use crate::ops::flags::{Diagonal, OpFlags, Transpose, Triangle};
use crate::storage::{StorageOrder, matrix_extent, vector_extent};
use bytemuck::Pod;

const _: () = assert!(
    size_of::<Complex64>() == size_of::<[f32; 2]>()
        && align_of::<Complex64>() == align_of::<[f32; 2]>()
);
const _: () = assert!(
    size_of::<Complex128>() == size_of::<[f64; 2]>()
        && align_of::<Complex128>() == align_of::<[f64; 2]>()
);

/// Backend order code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Order {
    /// `CblasRowMajor`
    RowMajor = 101,
    /// `CblasColMajor`
    ColMajor = 102,
}

/// Backend transpose code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Trans {
    /// `CblasNoTrans`
    NoTrans = 111,
    /// `CblasTrans`
    Trans = 112,
}

/// Backend triangle code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Uplo {
    /// `CblasUpper`
    Upper = 121,
    /// `CblasLower`
    Lower = 122,
}

/// Backend diagonal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Diag {
    /// `CblasNonUnit`
    NonUnit = 131,
    /// `CblasUnit`
    Unit = 132,
}

impl Order {
    /// The other order.
    pub const fn flipped(self) -> Self {
        match self {
            Self::RowMajor => Self::ColMajor,
            Self::ColMajor => Self::RowMajor,
        }
    }
}

impl Uplo {
    /// The other triangle.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Upper => Self::Lower,
            Self::Lower => Self::Upper,
        }
    }
}

impl Trans {
    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::NoTrans => Self::Trans,
            Self::Trans => Self::NoTrans,
        }
    }
}

/// The four positional flag arguments of a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendParams {
    /// Order code.
    pub order: Order,
    /// Triangle code.
    pub uplo: Uplo,
    /// Transpose code.
    pub trans: Trans,
    /// Diagonal code.
    pub diag: Diag,
}

/// Which storage orders a backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Convention {
    /// Takes an order code (CBLAS).
    Any,
    /// Works in one order only (Fortran BLAS is column-major).
    Native(StorageOrder),
}

const fn order_code(order: StorageOrder) -> Order {
    match order {
        StorageOrder::RowMajor => Order::RowMajor,
        StorageOrder::ColumnMajor => Order::ColMajor,
    }
}

/// Maps semantic flags and an operand order onto backend parameters.
///
/// Total over its inputs; for a fixed operand order the eight flag
/// combinations map onto eight distinct parameter sets.
pub const fn translate(
    flags: OpFlags,
    order: StorageOrder,
    convention: Convention,
) -> BackendParams {
    let (target, swap) = match convention {
        Convention::Any => (order, false),
        Convention::Native(native) => (native, !order.same_as(native)),
    };
    let triangle = if swap { flags.triangle.flipped() } else { flags.triangle };
    let transpose = if swap { flags.transpose.toggled() } else { flags.transpose };
    BackendParams {
        order: order_code(target),
        uplo: match triangle {
            Triangle::Upper => Uplo::Upper,
            Triangle::Lower => Uplo::Lower,
        },
        trans: match transpose {
            Transpose::NoTrans => Trans::NoTrans,
            Transpose::Trans => Trans::Trans,
        },
        diag: match flags.diagonal {
            Diagonal::Unit => Diag::Unit,
            Diagonal::NonUnit => Diag::NonUnit,
        },
    }
}

/// Reinterprets elements as the backend-native representation. No copy.
pub fn native_view<T: BackendScalar>(values: &[T]) -> &[T::Native] {
    bytemuck::cast_slice(values)
}

/// Mutable form of [`native_view`].
pub fn native_view_mut<T: BackendScalar>(values: &mut [T]) -> &mut [T::Native] {
    bytemuck::cast_slice_mut(values)
}

/// An element precision with a backend entry point.
pub trait BackendScalar: Scalar {
    /// Element type the backend signature uses.
    type Native: Pod;

    /// Calls the entry point for this precision on `B`.
    ///
    /// `a` is an `n x n` matrix with leading dimension `lda` in the order
    /// `params.order` names; `x` holds `n` elements `incx` apart.
    ///
    /// # Panics
    /// If the buffers are shorter than the described operands or a dimension
    /// does not fit the backend's `i32`. The dispatcher rules both out before
    /// getting here.
    fn backend_trmv<B: TrmvBackend>(
        params: BackendParams,
        n: usize,
        a: &[Self],
        lda: usize,
        x: &mut [Self],
        incx: usize,
    );
}

/// Backend integer arguments for a call whose extents have been checked.
struct CallDims {
    n: i32,
    lda: i32,
    incx: i32,
}

fn call_dims(n: usize, a_len: usize, lda: usize, x_len: usize, incx: usize) -> CallDims {
    // With at most one element neither spacing is ever applied.
    let (lda, incx) = if n <= 1 { (1, 1) } else { (lda, incx) };
    assert!(lda >= n, "leading dimension {lda} below {n}");
    assert!(incx >= 1, "vector stride must be positive");
    let a_needed = matrix_extent(n, n, lda, StorageOrder::RowMajor);
    assert!(
        a_needed.is_some_and(|needed| a_len >= needed),
        "matrix buffer of {a_len} cannot hold {n}x{n} with leading dimension {lda}"
    );
    let x_needed = vector_extent(n, incx);
    assert!(
        x_needed.is_some_and(|needed| x_len >= needed),
        "vector buffer of {x_len} cannot hold {n} elements {incx} apart"
    );
    let int = |v: usize| match i32::try_from(v) {
        Ok(v) => v,
        Err(_) => panic!("dimension {v} exceeds the backend integer range"),
    };
    CallDims {
        n: int(n),
        lda: int(lda),
        incx: int(incx),
    }
}

macro_rules! impl_backend_scalar {
    ($ty:ty, $native:ty, $entry:ident) => {
        impl BackendScalar for $ty {
            type Native = $native;

            fn backend_trmv<B: TrmvBackend>(
                params: BackendParams,
                n: usize,
                a: &[Self],
                lda: usize,
                x: &mut [Self],
                incx: usize,
            ) {
                let dims = call_dims(n, a.len(), lda, x.len(), incx);
                let a = native_view(a);
                let x = native_view_mut(x);
                // SAFETY: `call_dims` proved both buffers cover the operands
                // described by `n`, `lda` and `incx`, and `&mut` rules out aliasing.
                unsafe {
                    B::$entry(
                        params.order,
                        params.uplo,
                        params.trans,
                        params.diag,
                        dims.n,
                        a.as_ptr(),
                        dims.lda,
                        x.as_mut_ptr(),
                        dims.incx,
                    );
                }
            }
        }
    };
}

impl_backend_scalar!(f32, f32, strmv);
impl_backend_scalar!(f64, f64, dtrmv);
impl_backend_scalar!(Complex64, [f32; 2], ctrmv);
impl_backend_scalar!(Complex128, [f64; 2], ztrmv);
