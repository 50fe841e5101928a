//! Utilities to approximate equality of floating point values.
//!
//! Differences are measured relative to the larger magnitude of the two
//! values, floored at one, so results near zero are compared absolutely.
//! Complex values use the modulus of the difference.

use crate::dtype::{Complex64, Complex128};

/// The max epsilon accepted on `f32`s.
pub const F32_MAX_ERROR: f32 = 1e-3;

/// The expected minimum epsilon accepted on `f32`s.
pub const F32_AVG_ERROR: f32 = 1e-5;

/// The best expected epsilon accepted on `f32`s.
pub const F32_MIN_ERROR: f32 = 1e-6;

/// The max epsilon accepted on `f64`s.
pub const F64_MAX_ERROR: f64 = 1e-3;

/// The expected minimum epsilon accepted on `f64`s.
pub const F64_AVG_ERROR: f64 = 1e-6;

/// The best expected epsilon accepted on `f64`s.
pub const F64_MIN_ERROR: f64 = 1e-13;

/// Checks the relative distance based off epsilon.
pub trait RelativeEq<Rhs: ?Sized> {
    /// Enumerates the equality of `self`
    fn approx_eq(&self, rhs: &Rhs) -> ApproxEquality;
}

/// The approximated equality enumerated, best first.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApproxEquality {
    /// Very strong epsilon.
    Precise = 0,

    /// Good epsilon.
    Partial = 1,

    /// Acceptable epsilon
    Relative = 2,

    /// No relative equality.
    Scarce = 3,
}

macro_rules! grade {
    ($dif:expr, $min:expr, $avg:expr, $max:expr) => {{
        let dif = $dif;
        if dif < $min {
            ApproxEquality::Precise
        } else if dif < $avg {
            ApproxEquality::Partial
        } else if dif < $max {
            ApproxEquality::Relative
        } else {
            // NaN lands here too
            ApproxEquality::Scarce
        }
    }};
}

macro_rules! impl_real {
    ($ty:ty, $min:expr, $avg:expr, $max:expr) => {
        impl RelativeEq<Self> for $ty {
            fn approx_eq(&self, rhs: &Self) -> ApproxEquality {
                let scale = self.abs().max(rhs.abs()).max(1.0);
                grade!((self - rhs).abs() / scale, $min, $avg, $max)
            }
        }
    };
}

macro_rules! impl_complex {
    ($ty:ty, $min:expr, $avg:expr, $max:expr) => {
        impl RelativeEq<Self> for $ty {
            fn approx_eq(&self, rhs: &Self) -> ApproxEquality {
                let scale = self.norm().max(rhs.norm()).max(1.0);
                grade!((*self - *rhs).norm() / scale, $min, $avg, $max)
            }
        }
    };
}

impl_real!(f32, F32_MIN_ERROR, F32_AVG_ERROR, F32_MAX_ERROR);
impl_real!(f64, F64_MIN_ERROR, F64_AVG_ERROR, F64_MAX_ERROR);
impl_complex!(Complex64, F32_MIN_ERROR, F32_AVG_ERROR, F32_MAX_ERROR);
impl_complex!(Complex128, F64_MIN_ERROR, F64_AVG_ERROR, F64_MAX_ERROR);

/// Worst grade over paired elements; a length mismatch is [`ApproxEquality::Scarce`].
fn worst<'a, T: RelativeEq<U> + 'a, U: 'a>(
    lhs: impl ExactSizeIterator<Item = &'a T>,
    rhs: impl ExactSizeIterator<Item = &'a U>,
) -> ApproxEquality {
    if lhs.len() != rhs.len() {
        return ApproxEquality::Scarce;
    }
    let mut eq = ApproxEquality::Precise;
    for (t_val, u_val) in lhs.zip(rhs) {
        eq = eq.max(t_val.approx_eq(u_val));
        if eq == ApproxEquality::Scarce {
            break; // can't improve from here; not equal
        }
    }
    eq
}

impl<const N: usize, T: RelativeEq<U>, U> RelativeEq<[U; N]> for [T; N] {
    fn approx_eq(&self, rhs: &[U; N]) -> ApproxEquality {
        worst(self.iter(), rhs.iter())
    }
}

impl<T: RelativeEq<U>, U> RelativeEq<[U]> for [T] {
    fn approx_eq(&self, rhs: &[U]) -> ApproxEquality {
        worst(self.iter(), rhs.iter())
    }
}

/// Approximates equality based off the relative difference.
pub fn approx_eq<A: RelativeEq<B> + ?Sized, B: ?Sized>(a: &A, b: &B) -> bool {
    a.approx_eq(b) == ApproxEquality::Precise
}

/// Whether `a` and `b` are equal at `level` or better.
pub fn approx_within<A, B>(a: &A, b: &B, level: ApproxEquality) -> bool
where
    A: RelativeEq<B> + ?Sized,
    B: ?Sized,
{
    a.approx_eq(b) <= level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_by_relative_distance() {
        assert_eq!(1.0f64.approx_eq(&1.0), ApproxEquality::Precise);
        assert_eq!(1e5f32.approx_eq(&(1e5 + 1.0)), ApproxEquality::Partial);
        assert_eq!(1.0f32.approx_eq(&1.0001), ApproxEquality::Relative);
        assert_eq!(1.0f64.approx_eq(&1.1), ApproxEquality::Scarce);
        assert_eq!(f64::NAN.approx_eq(&f64::NAN), ApproxEquality::Scarce);
    }

    #[test]
    fn complex_uses_modulus() {
        let a = Complex128::new(3.0, 4.0);
        assert!(approx_eq(&a, &Complex128::new(3.0, 4.0 + 1e-15)));
        assert!(!approx_within(&a, &Complex128::new(3.0, 4.5), ApproxEquality::Relative));
    }

    #[test]
    fn slices_take_the_worst_element() {
        let a = [1.0f64, 2.0, 3.0];
        assert_eq!(a.approx_eq(&[1.0, 2.0 + 1e-9, 3.0]), ApproxEquality::Partial);
        assert!(approx_within(&a[..], &[1.0, 2.0, 3.0001][..], ApproxEquality::Relative));
        assert_eq!(a[..2].approx_eq(&a[..]), ApproxEquality::Scarce);
    }
}
