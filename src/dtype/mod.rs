//! Element types and their static tags.
//!
//! Every element a kernel can operate on implements [`Scalar`], which carries
//! its [`ElementType`] as an associated constant. The tag is a property of the
//! Rust type, so classifying an operand's precision never costs a branch.

mod complex;

pub use complex::{Complex64, Complex128};

use bytemuck::Pod;
use core::fmt::{self, Debug};
use core::ops::{Add, Mul};

/// Element precision of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// `f32`
    Real32,
    /// `f64`
    Real64,
    /// [`Complex64`], two `f32` parts.
    Complex64,
    /// [`Complex128`], two `f64` parts.
    Complex128,
}

impl ElementType {
    /// Every element type the crate knows about.
    pub const ALL: [Self; 4] = [
        Self::Real32,
        Self::Real64,
        Self::Complex64,
        Self::Complex128,
    ];

    /// Whether the element has an imaginary part.
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Size of one element in bytes.
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::Real32 => 4,
            Self::Real64 | Self::Complex64 => 8,
            Self::Complex128 => 16,
        }
    }

    /// Short lowercase name, as used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Real32 => "real32",
            Self::Real64 => "real64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An element a kernel can read, multiply and accumulate.
///
/// # Bounds
/// - `Pod` - plain bytes, so buffers can be reinterpreted for a backend
/// - `Add + Mul` - everything a triangular product needs
/// - `PartialEq` - the column-sweep backend skips zero entries
pub trait Scalar:
    Copy + Send + Sync + Debug + PartialEq + Pod + Add<Output = Self> + Mul<Output = Self>
{
    /// Static precision tag of this type.
    const ELEMENT: ElementType;

    /// Additive identity.
    fn zero() -> Self;

    /// Multiplicative identity.
    fn one() -> Self;
}

macro_rules! impl_scalar {
    ($ty:ty, $tag:ident, $zero:expr, $one:expr) => {
        impl Scalar for $ty {
            const ELEMENT: ElementType = ElementType::$tag;

            #[inline]
            fn zero() -> Self {
                $zero
            }

            #[inline]
            fn one() -> Self {
                $one
            }
        }
    };
}

impl_scalar!(f32, Real32, 0.0, 1.0);
impl_scalar!(f64, Real64, 0.0, 1.0);
impl_scalar!(Complex64, Complex64, Complex64::ZERO, Complex64::ONE);
impl_scalar!(Complex128, Complex128, Complex128::ZERO, Complex128::ONE);

/// Conversion of a matrix element into a vector's element type.
///
/// Real precisions convert both ways, as do complex precisions; narrowing
/// rounds to nearest like `as`. A real element becomes a complex one with a
/// zero imaginary part. There is no complex-to-real conversion, so a complex
/// matrix cannot update a real vector.
pub trait FromElement<T>: Sized {
    /// Converts `value` into `Self`.
    fn from_element(value: T) -> Self;
}

macro_rules! impl_from_element {
    ($($from:ty => $to:ty, |$v:ident| $body:expr;)*) => {
        $(
            impl FromElement<$from> for $to {
                #[inline]
                fn from_element($v: $from) -> Self {
                    $body
                }
            }
        )*
    };
}

impl_from_element! {
    f32 => f32, |v| v;
    f64 => f64, |v| v;
    f32 => f64, |v| f64::from(v);
    f64 => f32, |v| v as f32;
    Complex64 => Complex64, |v| v;
    Complex128 => Complex128, |v| v;
    Complex64 => Complex128, |v| Complex128::from(v);
    Complex128 => Complex64, |v| Complex64::new(v.re as f32, v.im as f32);
    f32 => Complex64, |v| Complex64::from(v);
    f64 => Complex128, |v| Complex128::from(v);
    f32 => Complex128, |v| Complex128::from(v);
    f64 => Complex64, |v| Complex64::from(v as f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_follow_the_type() {
        assert_eq!(f32::ELEMENT, ElementType::Real32);
        assert_eq!(f64::ELEMENT, ElementType::Real64);
        assert_eq!(Complex64::ELEMENT, ElementType::Complex64);
        assert_eq!(Complex128::ELEMENT, ElementType::Complex128);
    }

    #[test]
    fn sizes_agree_with_rust_layout() {
        assert_eq!(ElementType::Real32.size_in_bytes(), size_of::<f32>());
        assert_eq!(ElementType::Real64.size_in_bytes(), size_of::<f64>());
        assert_eq!(ElementType::Complex64.size_in_bytes(), size_of::<Complex64>());
        assert_eq!(ElementType::Complex128.size_in_bytes(), size_of::<Complex128>());
        assert_eq!(
            ElementType::ALL.iter().filter(|e| e.is_complex()).count(),
            2
        );
    }

    #[test]
    fn element_conversions() {
        assert_eq!(f32::from_element(0.1f64), 0.1f32);
        assert_eq!(f64::from_element(0.5f32), 0.5);
        let z = Complex128::new(1.0 / 3.0, -2.0);
        assert_eq!(Complex64::from_element(z), Complex64::new(1.0 / 3.0, -2.0));
        assert_eq!(Complex128::from_element(Complex64::new(0.25, 4.0)), Complex128::new(0.25, 4.0));
        assert_eq!(Complex64::from_element(3.0f64), Complex64::new(3.0, 0.0));
        assert_eq!(Complex128::from_element(-1.5f32), Complex128::new(-1.5, 0.0));
    }
}
