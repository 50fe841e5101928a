//! Storage classification and raw operand descriptors.
//!
//! # Storage Classifier
//!
//! Every operand type implements [`Operand`], naming its storage kind and its
//! element type as associated types. Both are fixed by the type, never by the
//! instance, so a kernel can be chosen by the compiler alone.
//!
//! Storage kinds are open: a new layout is a new marker type implementing
//! [`StorageTag`]. Existing kinds and the operand types built on them do not
//! change when one is added.
//!
//! # Access Protocols
//!
//! - [`MatrixAccess`] / [`VectorAccess`] / [`VectorAccessMut`] - element-wise
//!   access that any storage can provide; this is what the fallback kernel walks.
//! - [`DenseMatrixStorage`] / [`DenseVectorStorage`] - raw pointer-and-stride
//!   descriptors, only available on dense operands; this is what a backend needs.

use crate::dtype::Scalar;
use core::fmt;

/// Layout family of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Contiguous elements addressed by leading dimension or stride.
    Dense,
    /// Only a band around the diagonal is stored.
    Banded,
    /// Compressed sparse rows.
    Sparse,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dense => "dense",
            Self::Banded => "banded",
            Self::Sparse => "sparse",
        })
    }
}

/// Type-level storage marker.
pub trait StorageTag: 'static {
    /// Runtime-visible mirror of the marker, for logs and tests.
    const KIND: StorageKind;
}

/// Dense storage marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dense;

/// Banded storage marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Banded;

/// Compressed sparse storage marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sparse;

impl StorageTag for Dense {
    const KIND: StorageKind = StorageKind::Dense;
}

impl StorageTag for Banded {
    const KIND: StorageKind = StorageKind::Banded;
}

impl StorageTag for Sparse {
    const KIND: StorageKind = StorageKind::Sparse;
}

/// Memory order of a dense matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageOrder {
    /// Elements of a row are contiguous.
    #[default]
    RowMajor,
    /// Elements of a column are contiguous.
    ColumnMajor,
}

impl StorageOrder {
    /// Both orders.
    pub const ALL: [Self; 2] = [Self::RowMajor, Self::ColumnMajor];

    /// The other order.
    pub const fn flipped(self) -> Self {
        match self {
            Self::RowMajor => Self::ColumnMajor,
            Self::ColumnMajor => Self::RowMajor,
        }
    }

    /// `const` equality, for use in the flag translator.
    pub const fn same_as(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::RowMajor, Self::RowMajor) | (Self::ColumnMajor, Self::ColumnMajor)
        )
    }

    /// Offset of element `(i, j)` given a leading dimension.
    #[inline(always)]
    pub const fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Self::RowMajor => i * ld + j,
            Self::ColumnMajor => j * ld + i,
        }
    }
}

/// Static classification of an operand type.
pub trait Operand {
    /// Storage kind marker.
    type Storage: StorageTag;
    /// Element type.
    type Elem: Scalar;
}

/// Element-wise read access to a matrix.
pub trait MatrixAccess: Operand {
    /// Number of rows.
    fn size1(&self) -> usize;

    /// Number of columns.
    fn size2(&self) -> usize;

    /// Element `(i, j)`; entries outside the stored pattern read as zero.
    ///
    /// Callers keep `i < size1()` and `j < size2()`.
    fn at(&self, i: usize, j: usize) -> Self::Elem;
}

/// Element-wise read access to a vector.
pub trait VectorAccess: Operand {
    /// Logical length.
    fn len(&self) -> usize;

    /// Whether the vector has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `i`, with `i < len()`.
    fn get(&self, i: usize) -> Self::Elem;
}

/// Element-wise write access to a vector.
pub trait VectorAccessMut: VectorAccess {
    /// Overwrites element `i`, with `i < len()`.
    fn set(&mut self, i: usize, value: Self::Elem);
}

/// Raw descriptor of a dense matrix, borrowed for the duration of a call.
#[derive(Debug, Clone, Copy)]
pub struct RawMatrix<'a, T> {
    /// Backing buffer; element `(i, j)` lives at `order.index(i, j, leading_dimension)`.
    pub values: &'a [T],
    /// Rows.
    pub size1: usize,
    /// Columns.
    pub size2: usize,
    /// Distance between consecutive rows (row-major) or columns (column-major).
    pub leading_dimension: usize,
    /// Memory order.
    pub order: StorageOrder,
}

/// Raw descriptor of a dense strided vector, borrowed mutably for the duration of a call.
#[derive(Debug)]
pub struct RawVectorMut<'a, T> {
    /// Backing buffer; element `i` lives at `i * stride`.
    pub values: &'a mut [T],
    /// Logical length.
    pub size: usize,
    /// Distance between consecutive elements, at least 1.
    pub stride: usize,
}

/// Dense matrix operands expose their raw descriptor.
pub trait DenseMatrixStorage: MatrixAccess<Storage = Dense> {
    /// Pointer, sizes, leading dimension and order of the operand.
    fn raw(&self) -> RawMatrix<'_, Self::Elem>;
}

/// Dense vector operands expose their raw descriptor.
pub trait DenseVectorStorage: VectorAccessMut<Storage = Dense> {
    /// Pointer, size and stride of the operand.
    fn raw_mut(&mut self) -> RawVectorMut<'_, Self::Elem>;
}

/// Number of buffer elements a dense `size1 x size2` matrix addresses, or
/// `None` if that count overflows `usize`.
pub const fn matrix_extent(
    size1: usize,
    size2: usize,
    ld: usize,
    order: StorageOrder,
) -> Option<usize> {
    if size1 == 0 || size2 == 0 {
        return Some(0);
    }
    let (outer, inner) = match order {
        StorageOrder::RowMajor => (size1, size2),
        StorageOrder::ColumnMajor => (size2, size1),
    };
    match (outer - 1).checked_mul(ld) {
        Some(start) => start.checked_add(inner),
        None => None,
    }
}

/// Number of buffer elements a strided vector addresses, or `None` on overflow.
pub const fn vector_extent(size: usize, stride: usize) -> Option<usize> {
    if size == 0 {
        return Some(0);
    }
    match (size - 1).checked_mul(stride) {
        Some(last) => last.checked_add(1),
        None => None,
    }
}
