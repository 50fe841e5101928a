//! Capability registry.
//!
//! Answers "does the active backend have a kernel for these operands?" for a
//! `(matrix storage, vector storage, matrix element, vector element)` tuple.
//! The answer is an associated type, [`Accelerated`] or [`Fallback`], so the
//! compiler resolves it once per type combination and every call site with
//! the same operand types ends up on the same path.
//!
//! Rust has no impl specialization, so the "default is no acceleration" rule
//! is written out by `default_fallback!` for every built-in combination that
//! has no explicit rule. Giving the backend a new combination means moving it
//! from the generated defaults to an explicit `rule!`; the default itself is
//! never edited. A new storage kind brings its own rows and leaves these alone.
//!
//! Only element pairs the fallback kernel can convert are listed: real with
//! real, complex with complex, and a real matrix with a complex vector. A
//! complex matrix and a real vector have no entry, so such a call does not
//! compile.

use crate::dtype::{Complex64, Complex128};
use crate::storage::{Banded, Dense, Operand, Sparse};

/// Path marker: flag translation plus a backend call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accelerated;

/// Path marker: the generic storage-agnostic kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fallback;

/// A kernel path chosen by the registry.
pub trait KernelPath {
    /// Whether this is the backend path.
    const ACCELERATED: bool;
    /// Label used in logs.
    const NAME: &'static str;
}

impl KernelPath for Accelerated {
    const ACCELERATED: bool = true;
    const NAME: &'static str = "accelerated";
}

impl KernelPath for Fallback {
    const ACCELERATED: bool = false;
    const NAME: &'static str = "fallback";
}

/// Registry entry for triangular matrix-vector products, implemented on
/// `(S_matrix, S_vector, E_matrix, E_vector)` tuples.
pub trait TrmvCapability {
    /// Kernel path for the combination.
    type Path: KernelPath;
}

/// The path the registry selects for matrix `M` and vector `V`.
pub type TrmvPathOf<M, V> = <(
    <M as Operand>::Storage,
    <V as Operand>::Storage,
    <M as Operand>::Elem,
    <V as Operand>::Elem,
) as TrmvCapability>::Path;

/// Whether `trmv` on `M` and `V` reaches the backend, as a constant.
pub const fn has_optimized_trmv<M, V>() -> bool
where
    M: Operand,
    V: Operand,
    (M::Storage, V::Storage, M::Elem, V::Elem): TrmvCapability,
{
    <TrmvPathOf<M, V> as KernelPath>::ACCELERATED
}

macro_rules! rule {
    ($s1:ty, $s2:ty, $e1:ty, $e2:ty => $path:ty) => {
        impl TrmvCapability for ($s1, $s2, $e1, $e2) {
            type Path = $path;
        }
    };
}

macro_rules! default_fallback {
    (@real $s1:ty, $s2:ty, $e1:ty) => {
        rule!($s1, $s2, $e1, f32 => Fallback);
        rule!($s1, $s2, $e1, f64 => Fallback);
        rule!($s1, $s2, $e1, Complex64 => Fallback);
        rule!($s1, $s2, $e1, Complex128 => Fallback);
    };
    (@complex $s1:ty, $s2:ty, $e1:ty) => {
        rule!($s1, $s2, $e1, Complex64 => Fallback);
        rule!($s1, $s2, $e1, Complex128 => Fallback);
    };
    ($s1:ty, $s2:ty) => {
        default_fallback!(@real $s1, $s2, f32);
        default_fallback!(@real $s1, $s2, f64);
        default_fallback!(@complex $s1, $s2, Complex64);
        default_fallback!(@complex $s1, $s2, Complex128);
    };
    ($s1:ty, $s2:ty; $($e1:ty => [$($e2:ty),*]);* $(;)?) => {
        $($(rule!($s1, $s2, $e1, $e2 => Fallback);)*)*
    };
}

// backend kernels: dense operands of one backend precision
rule!(Dense, Dense, f32, f32 => Accelerated);
rule!(Dense, Dense, f64, f64 => Accelerated);
rule!(Dense, Dense, Complex64, Complex64 => Accelerated);
rule!(Dense, Dense, Complex128, Complex128 => Accelerated);

// mixed precision never reaches the backend
default_fallback!(Dense, Dense;
    f32 => [f64, Complex64, Complex128];
    f64 => [f32, Complex64, Complex128];
    Complex64 => [Complex128];
    Complex128 => [Complex64];
);

default_fallback!(Banded, Dense);
default_fallback!(Sparse, Dense);
