//! Semantic operation flags and their compile-time carriers.
//!
//! A call site picks its flags through the type of a zero-sized [`TrmvOp`]
//! value, e.g. `TrmvOp::<Lower, Unit, Trans>::new()`. The flags are read back
//! as the constant [`OperationTag::FLAGS`], so nothing about them is decided
//! or stored at runtime.

use core::fmt;
use core::marker::PhantomData;

/// Which triangle of the matrix takes part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Triangle {
    /// On and above the diagonal.
    Upper,
    /// On and below the diagonal.
    Lower,
}

impl Triangle {
    /// The opposite triangle.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Upper => Self::Lower,
            Self::Lower => Self::Upper,
        }
    }
}

/// How the diagonal is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagonal {
    /// Implicitly one; stored diagonal values are never read.
    Unit,
    /// Stored diagonal values are used.
    NonUnit,
}

/// Whether the matrix is applied as stored or transposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transpose {
    /// `x := A x`
    NoTrans,
    /// `x := Aᵀ x`
    Trans,
}

impl Transpose {
    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::NoTrans => Self::Trans,
            Self::Trans => Self::NoTrans,
        }
    }
}

/// The full flag set of one triangular operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpFlags {
    /// Stored triangle.
    pub triangle: Triangle,
    /// Diagonal treatment.
    pub diagonal: Diagonal,
    /// Transpose mode.
    pub transpose: Transpose,
}

impl OpFlags {
    /// Every point of the flag space.
    pub const ALL: [Self; 8] = [
        Self::new(Triangle::Upper, Diagonal::Unit, Transpose::NoTrans),
        Self::new(Triangle::Upper, Diagonal::Unit, Transpose::Trans),
        Self::new(Triangle::Upper, Diagonal::NonUnit, Transpose::NoTrans),
        Self::new(Triangle::Upper, Diagonal::NonUnit, Transpose::Trans),
        Self::new(Triangle::Lower, Diagonal::Unit, Transpose::NoTrans),
        Self::new(Triangle::Lower, Diagonal::Unit, Transpose::Trans),
        Self::new(Triangle::Lower, Diagonal::NonUnit, Transpose::NoTrans),
        Self::new(Triangle::Lower, Diagonal::NonUnit, Transpose::Trans),
    ];

    /// Bundles the three flags.
    pub const fn new(triangle: Triangle, diagonal: Diagonal, transpose: Transpose) -> Self {
        Self {
            triangle,
            diagonal,
            transpose,
        }
    }

    /// Whether `op(A)` is upper triangular: the stored triangle, swapped by a transpose.
    pub const fn effective_upper(self) -> bool {
        matches!(
            (self.triangle, self.transpose),
            (Triangle::Upper, Transpose::NoTrans) | (Triangle::Lower, Transpose::Trans)
        )
    }

    /// Whether the diagonal is implicit.
    pub const fn is_unit(self) -> bool {
        matches!(self.diagonal, Diagonal::Unit)
    }

    /// Whether the matrix is applied transposed.
    pub const fn is_transposed(self) -> bool {
        matches!(self.transpose, Transpose::Trans)
    }
}

impl fmt::Display for OpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tri = match self.triangle {
            Triangle::Upper => "upper",
            Triangle::Lower => "lower",
        };
        let diag = match self.diagonal {
            Diagonal::Unit => "unit",
            Diagonal::NonUnit => "nonunit",
        };
        let trans = match self.transpose {
            Transpose::NoTrans => "notrans",
            Transpose::Trans => "trans",
        };
        write!(f, "{tri}/{diag}/{trans}")
    }
}

/// Marker: upper triangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Upper;
/// Marker: lower triangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lower;
/// Marker: implicit unit diagonal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unit;
/// Marker: stored diagonal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonUnit;
/// Marker: apply as stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrans;
/// Marker: apply transposed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trans;

/// Type-level triangle.
pub trait TriangleTag {
    /// The triangle this marker selects.
    const TRIANGLE: Triangle;
}

/// Type-level diagonal treatment.
pub trait DiagonalTag {
    /// The diagonal mode this marker selects.
    const DIAGONAL: Diagonal;
}

/// Type-level transpose mode.
pub trait TransposeTag {
    /// The transpose mode this marker selects.
    const TRANSPOSE: Transpose;
}

impl TriangleTag for Upper {
    const TRIANGLE: Triangle = Triangle::Upper;
}
impl TriangleTag for Lower {
    const TRIANGLE: Triangle = Triangle::Lower;
}
impl DiagonalTag for Unit {
    const DIAGONAL: Diagonal = Diagonal::Unit;
}
impl DiagonalTag for NonUnit {
    const DIAGONAL: Diagonal = Diagonal::NonUnit;
}
impl TransposeTag for NoTrans {
    const TRANSPOSE: Transpose = Transpose::NoTrans;
}
impl TransposeTag for Trans {
    const TRANSPOSE: Transpose = Transpose::Trans;
}

/// A compile-time flag bundle.
pub trait OperationTag {
    /// The flags selected by this tag.
    const FLAGS: OpFlags;
}

/// Zero-sized operation tag for triangular matrix-vector products.
pub struct TrmvOp<Tri, Diag, Tr = NoTrans>(PhantomData<(Tri, Diag, Tr)>);

impl<Tri, Diag, Tr> TrmvOp<Tri, Diag, Tr> {
    /// The tag value; all information is in the type.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<Tri, Diag, Tr> Clone for TrmvOp<Tri, Diag, Tr> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tri, Diag, Tr> Copy for TrmvOp<Tri, Diag, Tr> {}

impl<Tri, Diag, Tr> Default for TrmvOp<Tri, Diag, Tr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tri: TriangleTag, Diag: DiagonalTag, Tr: TransposeTag> fmt::Debug for TrmvOp<Tri, Diag, Tr> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrmvOp({})", Self::FLAGS)
    }
}

impl<Tri: TriangleTag, Diag: DiagonalTag, Tr: TransposeTag> OperationTag for TrmvOp<Tri, Diag, Tr> {
    const FLAGS: OpFlags = OpFlags::new(Tri::TRIANGLE, Diag::DIAGONAL, Tr::TRANSPOSE);
}
